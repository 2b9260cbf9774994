//! Voxel-to-world orientation and canonical (RAS+) reordering.
//!
//! Reorientation only permutes and flips axes. No sample is interpolated.

use ndarray::{Array4, Axis};

use crate::error::{Error, Result};

/// Linear part of a voxel-to-world transform.
///
/// `m[world][voxel]`: column `v` is the world direction of voxel axis `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    m: [[f64; 3]; 3],
}

/// World axis a voxel axis maps to, and whether it runs backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCode {
    pub world: usize,
    pub flipped: bool,
}

impl Affine {
    #[must_use]
    pub fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::from_diagonal([1.0, 1.0, 1.0])
    }

    /// Axis-aligned scaling by the voxel sizes.
    #[must_use]
    pub fn from_diagonal(d: [f64; 3]) -> Self {
        Self {
            m: [[d[0], 0.0, 0.0], [0.0, d[1], 0.0], [0.0, 0.0, d[2]]],
        }
    }

    /// Build from a unit quaternion `(b, c, d)`, voxel sizes and the `qfac`
    /// sign applied to the third axis.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn from_quaternion(b: f64, c: f64, d: f64, qfac: f64, pixdim: [f64; 3]) -> Self {
        let a = (1.0 - (b * b + c * c + d * d)).max(0.0).sqrt();
        let r = [
            [
                a * a + b * b - c * c - d * d,
                2.0 * (b * c - a * d),
                2.0 * (b * d + a * c),
            ],
            [
                2.0 * (b * c + a * d),
                a * a + c * c - b * b - d * d,
                2.0 * (c * d - a * b),
            ],
            [
                2.0 * (b * d - a * c),
                2.0 * (c * d + a * b),
                a * a + d * d - c * c - b * b,
            ],
        ];
        let qfac = if qfac < 0.0 { -1.0 } else { 1.0 };
        let scale = [pixdim[0], pixdim[1], qfac * pixdim[2]];
        let mut m = [[0.0; 3]; 3];
        for (w, row) in r.iter().enumerate() {
            for (v, value) in row.iter().enumerate() {
                m[w][v] = value * scale[v];
            }
        }
        Self { m }
    }

    #[must_use]
    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.m
    }

    /// Map each voxel axis onto its closest world axis.
    ///
    /// Assignment is greedy on the largest absolute entry, so every world
    /// axis is used exactly once.
    ///
    /// # Errors
    /// Returns an error if a voxel axis has no usable world component.
    pub fn axis_codes(&self) -> Result<[AxisCode; 3]> {
        let mut codes = [None; 3];
        let mut world_used = [false; 3];
        for _ in 0..3 {
            let mut best: Option<(usize, usize, f64)> = None;
            for (w, row) in self.m.iter().enumerate() {
                if world_used[w] {
                    continue;
                }
                for (v, &value) in row.iter().enumerate() {
                    if codes[v].is_some() || !value.is_finite() {
                        continue;
                    }
                    if best.is_none_or(|(_, _, b)| value.abs() > b.abs()) {
                        best = Some((w, v, value));
                    }
                }
            }
            match best {
                Some((w, v, value)) if value != 0.0 => {
                    world_used[w] = true;
                    codes[v] = Some(AxisCode {
                        world: w,
                        flipped: value < 0.0,
                    });
                }
                _ => return Err(Error::DegenerateOrientation),
            }
        }
        match codes {
            [Some(x), Some(y), Some(z)] => Ok([x, y, z]),
            _ => Err(Error::DegenerateOrientation),
        }
    }
}

/// Three-letter orientation code such as `RAS` or `LPS`.
#[must_use]
pub fn orientation_label(codes: &[AxisCode; 3]) -> String {
    const POSITIVE: [char; 3] = ['R', 'A', 'S'];
    const NEGATIVE: [char; 3] = ['L', 'P', 'I'];
    codes
        .iter()
        .map(|c| {
            if c.flipped {
                NEGATIVE[c.world]
            } else {
                POSITIVE[c.world]
            }
        })
        .collect()
}

/// Reorder the spatial axes of `data` so voxel axis `i` runs along world
/// axis `i` in the positive direction. Frames stay on the last axis.
///
/// # Errors
/// Returns an error if the affine is degenerate.
pub fn to_canonical(data: Array4<f32>, affine: &Affine) -> Result<Array4<f32>> {
    let codes = affine.axis_codes()?;
    if codes
        .iter()
        .enumerate()
        .all(|(v, c)| c.world == v && !c.flipped)
    {
        return Ok(data);
    }

    // perm[world] = voxel axis feeding it
    let mut perm = [0usize; 3];
    for (v, code) in codes.iter().enumerate() {
        perm[code.world] = v;
    }
    let mut out = data.permuted_axes([perm[0], perm[1], perm[2], 3]);
    for (w, &v) in perm.iter().enumerate() {
        if codes[v].flipped {
            out.invert_axis(Axis(w));
        }
    }
    log::debug!(
        "reoriented {} -> RAS, shape {:?}",
        orientation_label(&codes),
        out.shape()
    );
    Ok(out.as_standard_layout().into_owned())
}
