//! sbv-core: Volume model and control linking for `SimpleBrainViewer`.
//!
//! This crate provides the in-memory volume, orthogonal slice extraction,
//! canonical reorientation, and the control layer that binds sliders and
//! `-`/`+` buttons to slice redraw callbacks.
//!

pub mod control;
pub mod error;
pub mod manager;
pub mod orientation;
pub mod viewer;
pub mod volume;

pub use control::{Button, Control, Slider};
pub use error::{Error, Result};
pub use manager::{Callback, ControlManager, Dispatch, Display};
pub use orientation::{orientation_label, to_canonical, Affine, AxisCode};
pub use viewer::{Probe, ViewId, Viewer};
pub use volume::{into_4d, IntensityRange, Plane, Volume};
