//! Volume data model.
//!
//! A [`Volume`] is an immutable 4D array of scalar intensities indexed
//! `[x, y, z, t]`. Three-dimensional inputs are promoted to a single frame.
//! The global intensity range is computed once at construction so every
//! slice of the volume is displayed with the same contrast.

use std::fmt;

use ndarray::{s, Array2, Array3, Array4, ArrayD, Axis, Ix3, Ix4};

use crate::error::{Error, Result};

/// One of the three orthogonal anatomical planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Fixes x, shows (y, z).
    Sagittal,
    /// Fixes y, shows (x, z).
    Coronal,
    /// Fixes z, shows (x, y).
    Transverse,
}

impl Plane {
    /// All planes in display order.
    pub const ALL: [Plane; 3] = [Plane::Sagittal, Plane::Coronal, Plane::Transverse];

    /// Volume axis held fixed by this plane.
    #[must_use]
    pub fn axis(self) -> usize {
        match self {
            Plane::Sagittal => 0,
            Plane::Coronal => 1,
            Plane::Transverse => 2,
        }
    }

    /// Volume axes spanned by a slice, as `(column axis, row axis)`.
    #[must_use]
    pub fn in_plane_axes(self) -> (usize, usize) {
        match self {
            Plane::Sagittal => (1, 2),
            Plane::Coronal => (0, 2),
            Plane::Transverse => (0, 1),
        }
    }

    /// Short label shown next to the plane's slider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Plane::Sagittal => "S",
            Plane::Coronal => "C",
            Plane::Transverse => "T",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::Sagittal => write!(f, "sagittal"),
            Plane::Coronal => write!(f, "coronal"),
            Plane::Transverse => write!(f, "transverse"),
        }
    }
}

/// Global intensity bounds of a volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange {
    pub min: f32,
    pub max: f32,
}

impl IntensityRange {
    /// Compute the range of all finite samples.
    ///
    /// Returns `0.0..0.0` when there is no finite sample.
    #[must_use]
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a f32>,
    {
        let (min, max) = samples
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// Width of the range.
    #[must_use]
    pub fn span(self) -> f32 {
        self.max - self.min
    }

    /// Map a sample into `[0, 1]`.
    ///
    /// Degenerate ranges and non-finite samples map to 0.
    #[must_use]
    pub fn normalize(self, value: f32) -> f32 {
        let span = self.span();
        if !value.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Reshape a 3D or 4D array into `[x, y, z, t]`, adding a single frame to
/// 3D input.
///
/// # Errors
/// Returns an error for any other dimensionality.
pub fn into_4d(array: ArrayD<f32>) -> Result<Array4<f32>> {
    let shape = array.shape().to_vec();
    match array.ndim() {
        3 => array
            .into_dimensionality::<Ix3>()
            .map(|a| a.insert_axis(Axis(3)))
            .map_err(|_| Error::UnsupportedShape { shape }),
        4 => array
            .into_dimensionality::<Ix4>()
            .map_err(|_| Error::UnsupportedShape { shape }),
        _ => Err(Error::UnsupportedShape { shape }),
    }
}

/// An immutable 4D intensity volume indexed `[x, y, z, t]`.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array4<f32>,
    intensity: IntensityRange,
}

impl Volume {
    /// Build a volume from a dynamically shaped array.
    ///
    /// 3D arrays become a single-frame 4D volume.
    ///
    /// # Errors
    /// Returns an error if the array is not 3D or 4D or has an empty axis.
    pub fn from_array(array: ArrayD<f32>) -> Result<Self> {
        Self::from_array4(into_4d(array)?)
    }

    /// Promote a 3D array to a single-frame volume.
    ///
    /// # Errors
    /// Returns an error if any axis is empty.
    pub fn from_array3(array: Array3<f32>) -> Result<Self> {
        Self::from_array4(array.insert_axis(Axis(3)))
    }

    /// Build a volume from a 4D array.
    ///
    /// # Errors
    /// Returns an error if any axis is empty.
    pub fn from_array4(data: Array4<f32>) -> Result<Self> {
        if let Some(axis) = data.shape().iter().position(|&len| len == 0) {
            return Err(Error::EmptyDimension { axis });
        }
        let intensity = IntensityRange::from_samples(data.iter());
        Ok(Self { data, intensity })
    }

    /// Build a volume from row-major samples and a 3D or 4D shape.
    ///
    /// # Errors
    /// Returns an error if the length does not match the shape or the shape
    /// is unsupported.
    pub fn from_shape_vec(shape: &[usize], samples: Vec<f32>) -> Result<Self> {
        let len = samples.len();
        let array = ArrayD::from_shape_vec(shape.to_vec(), samples).map_err(|_| {
            Error::LengthMismatch {
                len,
                shape: shape.to_vec(),
            }
        })?;
        Self::from_array(array)
    }

    /// Shape as `[x, y, z, t]`.
    #[must_use]
    pub fn shape(&self) -> [usize; 4] {
        let (x, y, z, t) = self.data.dim();
        [x, y, z, t]
    }

    /// Length of one axis (0..=3).
    #[must_use]
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.data.len_of(Axis(axis))
    }

    /// Number of frames (always at least 1).
    #[must_use]
    #[inline]
    pub fn n_frames(&self) -> usize {
        self.dim(3)
    }

    /// Middle index of each spatial axis (`len / 2`).
    #[must_use]
    pub fn midpoint(&self) -> [usize; 3] {
        let [x, y, z, _] = self.shape();
        [x / 2, y / 2, z / 2]
    }

    /// Global intensity range, computed once at construction.
    #[must_use]
    #[inline]
    pub fn intensity_range(&self) -> IntensityRange {
        self.intensity
    }

    /// Underlying 4D array.
    #[must_use]
    pub fn data(&self) -> &Array4<f32> {
        &self.data
    }

    /// Sample at a voxel position.
    #[must_use]
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize, t: usize) -> Option<f32> {
        self.data.get((x, y, z, t)).copied()
    }

    /// Shape of a slice through `plane`, as `(columns, rows)`.
    #[must_use]
    pub fn slice_shape(&self, plane: Plane) -> (usize, usize) {
        let (col, row) = plane.in_plane_axes();
        (self.dim(col), self.dim(row))
    }

    /// Extract the 2D cross-section of `plane` at `index` and `frame`.
    ///
    /// The result is indexed `[column, row]` (see [`Plane::in_plane_axes`]).
    ///
    /// # Errors
    /// Returns an error if `index` or `frame` is outside the volume.
    pub fn slice(&self, plane: Plane, index: usize, frame: usize) -> Result<Array2<f32>> {
        let axis = plane.axis();
        self.check_index(axis, index)?;
        self.check_index(3, frame)?;
        let view = match plane {
            Plane::Sagittal => self.data.slice(s![index, .., .., frame]),
            Plane::Coronal => self.data.slice(s![.., index, .., frame]),
            Plane::Transverse => self.data.slice(s![.., .., index, frame]),
        };
        Ok(view.to_owned())
    }

    fn check_index(&self, axis: usize, index: usize) -> Result<()> {
        let len = self.dim(axis);
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { axis, index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array, IxDyn};

    fn ramp(shape: &[usize]) -> ArrayD<f32> {
        let len: usize = shape.iter().product();
        #[allow(clippy::cast_precision_loss)]
        let samples = (0..len).map(|i| i as f32).collect();
        Array::from_shape_vec(IxDyn(shape), samples).unwrap()
    }

    #[test]
    fn test_promote_3d_single_frame() {
        let array = ramp(&[3, 4, 5]);
        let vol = Volume::from_array(array.clone()).unwrap();
        assert_eq!(vol.shape(), [3, 4, 5, 1]);
        assert_eq!(vol.n_frames(), 1);

        let original = array.into_dimensionality::<Ix3>().unwrap();
        let slice = vol.slice(Plane::Coronal, 2, 0).unwrap();
        assert_eq!(slice, original.slice(s![.., 2, ..]));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            Volume::from_array(ramp(&[4, 4])),
            Err(Error::UnsupportedShape { .. })
        ));
        assert!(matches!(
            Volume::from_array(ramp(&[2, 2, 2, 2, 2])),
            Err(Error::UnsupportedShape { .. })
        ));
        assert!(matches!(
            Volume::from_array(ramp(&[2, 0, 2])),
            Err(Error::EmptyDimension { axis: 1 })
        ));
    }

    #[test]
    fn test_shape_vec_length_mismatch() {
        let err = Volume::from_shape_vec(&[2, 2, 2], vec![0.0; 7]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { len: 7, .. }));
    }

    #[test]
    fn test_global_intensity_range() {
        let mut array = ramp(&[4, 3, 2, 2]);
        array[[1, 1, 1, 1]] = -7.5;
        array[[0, 0, 0, 0]] = f32::NAN;
        let vol = Volume::from_array(array).unwrap();
        let range = vol.intensity_range();
        assert_relative_eq!(range.min, -7.5);
        assert_relative_eq!(range.max, 47.0);
    }

    #[test]
    fn test_normalize() {
        let range = IntensityRange { min: 10.0, max: 20.0 };
        assert_relative_eq!(range.normalize(10.0), 0.0);
        assert_relative_eq!(range.normalize(15.0), 0.5);
        assert_relative_eq!(range.normalize(25.0), 1.0);
        assert_relative_eq!(range.normalize(f32::NAN), 0.0);

        let flat = IntensityRange { min: 3.0, max: 3.0 };
        assert_relative_eq!(flat.normalize(3.0), 0.0);
    }

    #[test]
    fn test_slice_axes_and_bounds() {
        let vol = Volume::from_array(ramp(&[2, 3, 4, 5])).unwrap();
        assert_eq!(vol.slice(Plane::Sagittal, 1, 0).unwrap().dim(), (3, 4));
        assert_eq!(vol.slice(Plane::Coronal, 1, 0).unwrap().dim(), (2, 4));
        assert_eq!(vol.slice(Plane::Transverse, 1, 0).unwrap().dim(), (2, 3));
        assert_eq!(vol.slice_shape(Plane::Coronal), (2, 4));

        let slice = vol.slice(Plane::Transverse, 3, 4).unwrap();
        assert_eq!(slice[[1, 2]], vol.get(1, 2, 3, 4).unwrap());

        assert!(matches!(
            vol.slice(Plane::Sagittal, 2, 0),
            Err(Error::IndexOutOfRange { axis: 0, .. })
        ));
        assert!(matches!(
            vol.slice(Plane::Sagittal, 0, 5),
            Err(Error::IndexOutOfRange { axis: 3, .. })
        ));
    }

    #[test]
    fn test_midpoint() {
        let vol = Volume::from_array(ramp(&[5, 4, 3])).unwrap();
        assert_eq!(vol.midpoint(), [2, 2, 1]);
    }
}
