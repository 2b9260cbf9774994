//! Slice rendering: colormaps and texture images.

mod colormap;
mod texture;

pub use colormap::Colormap;
pub use texture::slice_image;
