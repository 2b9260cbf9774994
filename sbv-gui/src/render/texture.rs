//! Texture generation for slice display.

use egui::ColorImage;
use ndarray::Array2;
use sbv_core::IntensityRange;

use crate::render::Colormap;

/// Generate a color image from a slice indexed `[column, row]`.
///
/// Row 0 of the slice is drawn at the bottom of the image. Intensities are
/// scaled with the volume-wide `range` so contrast does not change between
/// slices.
#[must_use]
pub fn slice_image(slice: &Array2<f32>, range: IntensityRange, colormap: Colormap) -> ColorImage {
    let (cols, rows) = slice.dim();
    let mut pixels = vec![0u8; cols * rows * 4];

    for ((col, row), &value) in slice.indexed_iter() {
        let y = rows - 1 - row;
        let offset = (y * cols + col) * 4;
        let rgba = colormap.apply(range.normalize(value));
        pixels[offset..offset + 4].copy_from_slice(&rgba);
    }

    ColorImage::from_rgba_unmultiplied([cols, rows], &pixels)
}
