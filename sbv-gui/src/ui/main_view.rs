//! Main view (central panel) rendering.
//!
//! Three plots side by side, one per plane, each with its control row
//! underneath, and the frame control centred below them.

use eframe::egui;
use egui_plot::{Plot, PlotImage, PlotPoint};
use sbv_core::{Plane, Probe, ViewId};

use crate::app::{ControlAction, SbvApp};
use crate::ui::controls::control_row;
use crate::util::{f64_to_usize_bounded, usize_to_f32};

/// Height reserved under each plot for its control row.
const CONTROL_ROW_HEIGHT: f32 = 64.0;

impl SbvApp {
    /// Render the central panel with the slice views and controls.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let mut actions: Vec<(ViewId, ControlAction)> = Vec::new();
        let mut hovered = None;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.background)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0)),
            )
            .show(ctx, |ui| {
                let plot_height =
                    (ui.available_height() - 2.0 * CONTROL_ROW_HEIGHT).max(120.0);

                ui.columns(3, |columns| {
                    for (ui, plane) in columns.iter_mut().zip(Plane::ALL) {
                        if let Some(probe) = self.render_slice_plot(ui, plane, plot_height) {
                            hovered = Some(probe);
                        }
                        let id = ViewId::from(plane);
                        if let Ok(control) = self.viewer.control(id) {
                            if let Some(action) = control_row(ui, id, control, &self.theme) {
                                actions.push((id, action));
                            }
                        }
                    }
                });

                ui.add_space(8.0);
                ui.columns(3, |columns| {
                    if let Ok(control) = self.viewer.control(ViewId::Frame) {
                        if let Some(action) =
                            control_row(&mut columns[1], ViewId::Frame, control, &self.theme)
                        {
                            actions.push((ViewId::Frame, action));
                        }
                    }
                });
            });

        self.cursor = hovered;
        if !actions.is_empty() {
            for (id, action) in actions {
                self.apply(id, action);
            }
            ctx.request_repaint();
        }
    }

    /// Draw one plane's texture and return the voxel under the pointer.
    fn render_slice_plot(&self, ui: &mut egui::Ui, plane: Plane, height: f32) -> Option<Probe> {
        let Some(texture) = self.textures.get(&plane) else {
            ui.allocate_space(egui::vec2(ui.available_width(), height));
            return None;
        };
        let [cols, rows] = texture.handle.size();
        let (w, h) = (usize_to_f32(cols), usize_to_f32(rows));

        let response = Plot::new(("slice", plane))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .show_background(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.image(PlotImage::new(
                    &texture.handle,
                    PlotPoint::new(f64::from(w) / 2.0, f64::from(h) / 2.0),
                    [w, h],
                ));
                plot_ui.pointer_coordinate()
            });

        let point = response.inner?;
        let column = f64_to_usize_bounded(point.x, cols)?;
        let row = f64_to_usize_bounded(point.y, rows)?;
        self.viewer.probe(plane, column, row)
    }
}
