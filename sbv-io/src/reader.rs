//! `NIfTI` volume reader.
//!

use std::path::Path;

use ndarray::ArrayD;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use sbv_core::{into_4d, orientation_label, to_canonical, Affine, Volume};

use crate::header::{header_affine, AffineSource};
use crate::{Error, Result};

/// Options for [`load_volume`].
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Reorder axes to the closest RAS+ orientation.
    pub canonical: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { canonical: true }
    }
}

/// A decoded `NIfTI` image before it becomes a [`Volume`].
#[derive(Debug, Clone)]
pub struct NiftiImage {
    /// Samples with `scl_slope`/`scl_inter` applied, indexed `[x, y, z, ...]`.
    pub data: ArrayD<f32>,
    pub affine: Affine,
    pub affine_source: AffineSource,
}

/// Read a `.nii` or `.nii.gz` file.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn read_nifti<P: AsRef<Path>>(path: P) -> Result<NiftiImage> {
    let obj = ReaderOptions::new().read_file(path.as_ref())?;
    let (affine, affine_source) = header_affine(obj.header());
    let array = obj.into_volume().into_ndarray::<f32>()?;

    // Copy out in logical order; the decoded array is column-major.
    let shape = array.shape().to_vec();
    let samples: Vec<f32> = array.iter().copied().collect();
    let data = ArrayD::from_shape_vec(shape.clone(), samples)
        .map_err(|e| Error::InvalidFormat(format!("shape {shape:?}: {e}")))?;

    Ok(NiftiImage {
        data: squeeze_trailing(data),
        affine,
        affine_source,
    })
}

/// Load a volume file into memory.
///
/// # Errors
/// Returns an error if the file cannot be read or does not hold a 3D/4D
/// image.
pub fn load_volume<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Volume> {
    let path = path.as_ref();
    let image = read_nifti(path)?;
    let mut data = into_4d(image.data)?;
    if options.canonical {
        data = to_canonical(data, &image.affine)?;
    }
    let volume = Volume::from_array4(data)?;

    let orientation = image
        .affine
        .axis_codes()
        .map_or_else(|_| "?".to_string(), |codes| orientation_label(&codes));
    log::info!(
        "loaded {}: shape {:?}, {:?} orientation {}{}",
        path.display(),
        volume.shape(),
        image.affine_source,
        orientation,
        if options.canonical { " (reoriented to RAS)" } else { "" }
    );
    Ok(volume)
}

/// Drop length-1 axes beyond the fourth.
fn squeeze_trailing(mut data: ArrayD<f32>) -> ArrayD<f32> {
    while data.ndim() > 4 && data.shape()[data.ndim() - 1] == 1 {
        let last = data.ndim() - 1;
        data = data.index_axis_move(ndarray::Axis(last), 0);
    }
    data
}
