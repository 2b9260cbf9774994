//! sbv-io: Volume file loading for `SimpleBrainViewer`.
//!
//! This crate reads `NIfTI-1` images (`.nii`, `.nii.gz`) through
//! the `nifti` crate and turns them into [`sbv_core::Volume`]s, optionally
//! reordered to the closest RAS+ orientation.

mod error;
pub mod header;
mod reader;

pub use error::{Error, Result};
pub use header::{header_affine, voxel_sizes, AffineSource};
pub use reader::{load_volume, read_nifti, LoadOptions, NiftiImage};
