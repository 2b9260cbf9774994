//! Voxel-to-world orientation from a `NIfTI` header.

use nifti::NiftiHeader;
use sbv_core::Affine;

/// Which header fields the affine was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffineSource {
    Sform,
    Qform,
    /// Neither form is set; voxel sizes on the diagonal.
    Pixdim,
}

/// Voxel sizes of the three spatial axes, with unusable entries set to 1.
#[must_use]
pub fn voxel_sizes(header: &NiftiHeader) -> [f64; 3] {
    let mut sizes = [1.0; 3];
    for (size, &raw) in sizes.iter_mut().zip(&header.pixdim[1..4]) {
        let raw = f64::from(raw);
        if raw.is_finite() && raw > 0.0 {
            *size = raw;
        }
    }
    sizes
}

/// Linear part of the voxel-to-world transform described by `header`.
///
/// The sform wins when `sform_code > 0`, then the qform when
/// `qform_code > 0`, otherwise the voxel sizes.
#[must_use]
pub fn header_affine(header: &NiftiHeader) -> (Affine, AffineSource) {
    if header.sform_code > 0 {
        let rows = [header.srow_x, header.srow_y, header.srow_z]
            .map(|row| [f64::from(row[0]), f64::from(row[1]), f64::from(row[2])]);
        return (Affine::from_rows(rows), AffineSource::Sform);
    }
    let sizes = voxel_sizes(header);
    if header.qform_code > 0 {
        let affine = Affine::from_quaternion(
            f64::from(header.quatern_b),
            f64::from(header.quatern_c),
            f64::from(header.quatern_d),
            f64::from(header.pixdim[0]),
            sizes,
        );
        return (affine, AffineSource::Qform);
    }
    (Affine::from_diagonal(sizes), AffineSource::Pixdim)
}
