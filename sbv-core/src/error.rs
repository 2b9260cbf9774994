//! Error types for sbv-core.

use thiserror::Error;

/// Result type alias for sbv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for volume and control operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The input array is neither 3D nor 4D.
    #[error("unsupported volume shape {shape:?}: expected 3 or 4 dimensions")]
    UnsupportedShape { shape: Vec<usize> },

    /// One of the volume axes has length zero.
    #[error("volume axis {axis} is empty")]
    EmptyDimension { axis: usize },

    /// Flat data length does not match the requested shape.
    #[error("data length {len} does not match shape {shape:?}")]
    LengthMismatch { len: usize, shape: Vec<usize> },

    /// No control is registered under the given name.
    #[error("unknown control: {0}")]
    UnknownControl(String),

    /// No display surface is registered under the given name.
    #[error("unknown display: {0}")]
    UnknownDisplay(String),

    /// Replacement data does not match the display bounds.
    #[error("display {name} expects shape {expected:?}, got {actual:?}")]
    DisplayShapeMismatch {
        name: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Slice or frame index outside the volume.
    #[error("index {index} out of range for axis {axis} (len {len})")]
    IndexOutOfRange { axis: usize, index: usize, len: usize },

    /// Orientation matrix cannot be mapped onto world axes.
    #[error("degenerate orientation matrix")]
    DegenerateOrientation,
}
