//! UI rendering modules.
//!
//! Contains the UI rendering logic split into separate modules:
//! - `controls`: Slider row with `-`/`+` buttons
//! - `main_view`: Central panel with the three slice views
//! - `status`: Bottom status bar
//! - `theme`: Colors and styling

mod controls;
mod main_view;
mod status;
pub mod theme;
