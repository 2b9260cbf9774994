//! Main application state and logic.
//!
//! Contains the `SbvApp` struct which owns the [`Viewer`], keeps one texture
//! per plane in sync with the viewer's display surfaces, and turns widget
//! input into control events.

use std::collections::HashMap;

use eframe::egui;
use sbv_core::{Button, Plane, Probe, ViewId, Viewer};

use crate::render::{slice_image, Colormap};
use crate::ui::theme::Theme;

/// Window title.
pub const APP_TITLE: &str = "SimpleBrainViewer";

/// Settings handed to the window when it is created.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub title: String,
    /// Initial inner size in points.
    pub size: [f32; 2],
    pub colormap: Colormap,
    pub theme: Theme,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            size: [1200.0, 600.0],
            colormap: Colormap::default(),
            theme: Theme::default(),
        }
    }
}

/// Input produced by a control row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Slider dragged to a position.
    Slide(usize),
    /// `-` or `+` clicked.
    Press(Button),
}

/// A plane texture and the display revision it was built from.
pub(crate) struct SliceTexture {
    pub(crate) handle: egui::TextureHandle,
    revision: u64,
}

/// Main application state.
pub struct SbvApp {
    /// Volume, controls and display surfaces.
    pub(crate) viewer: Viewer,
    /// Uploaded slice textures.
    pub(crate) textures: HashMap<Plane, SliceTexture>,
    /// Current colormap selection.
    pub(crate) colormap: Colormap,
    /// Window colors.
    pub(crate) theme: Theme,
    /// Voxel under the cursor, if any.
    pub(crate) cursor: Option<Probe>,
}

impl SbvApp {
    #[must_use]
    pub fn new(viewer: Viewer, settings: &WindowSettings) -> Self {
        Self {
            viewer,
            textures: HashMap::new(),
            colormap: settings.colormap,
            theme: settings.theme,
            cursor: None,
        }
    }

    /// Forward a widget action to the viewer.
    pub fn apply(&mut self, id: ViewId, action: ControlAction) {
        let result = match action {
            ControlAction::Slide(position) => self.viewer.set_slider(id, position),
            ControlAction::Press(button) => self.viewer.press(id, button),
        };
        if let Err(e) = result {
            log::error!("{id} control: {e}");
        }
    }

    /// Switch colormap; all textures are rebuilt on the next frame.
    pub fn set_colormap(&mut self, colormap: Colormap) {
        if self.colormap != colormap {
            self.colormap = colormap;
            self.textures.clear();
        }
    }

    /// Upload display surfaces whose revision changed since the last frame.
    pub(crate) fn sync_textures(&mut self, ctx: &egui::Context) {
        let range = self.viewer.intensity_range();
        for plane in Plane::ALL {
            let Ok(display) = self.viewer.display(plane) else {
                continue;
            };
            let revision = display.revision();
            match self.textures.get_mut(&plane) {
                Some(texture) if texture.revision == revision => {}
                Some(texture) => {
                    let image = slice_image(display.data(), range, self.colormap);
                    texture.handle.set(image, egui::TextureOptions::NEAREST);
                    texture.revision = revision;
                }
                None => {
                    let image = slice_image(display.data(), range, self.colormap);
                    let handle = ctx.load_texture(
                        format!("slice-{plane}"),
                        image,
                        egui::TextureOptions::NEAREST,
                    );
                    self.textures.insert(plane, SliceTexture { handle, revision });
                }
            }
        }
    }
}

impl eframe::App for SbvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_bottom_panel(ctx);
        self.sync_textures(ctx);
        self.render_central_panel(ctx);
    }
}

/// Open the viewer window and block until it is closed.
///
/// # Errors
/// Returns an error if the window or graphics context cannot be created.
pub fn run(viewer: Viewer, settings: WindowSettings) -> anyhow::Result<()> {
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.title.clone())
            .with_inner_size(settings.size),
        ..Default::default()
    };
    let title = settings.title.clone();
    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            settings.theme.apply(&cc.egui_ctx);
            Ok(Box::new(SbvApp::new(viewer, &settings)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}
