//! Bottom status bar: cursor readout, volume summary, colormap picker.

use eframe::egui;

use super::theme::{stat_label, stat_value, stat_value_highlight};
use crate::app::SbvApp;
use crate::render::Colormap;
use crate::util::format_intensity;

impl SbvApp {
    /// Render the bottom status bar.
    pub(crate) fn render_bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.panel)
                    .inner_margin(egui::Margin {
                        left: 16.0,
                        right: 16.0,
                        top: 6.0,
                        bottom: 6.0,
                    }),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    self.render_cursor_status(ui);
                    Self::status_separator(ui);
                    self.render_volume_summary(ui);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_colormap_select(ui);
                    });
                });
            });
    }

    fn render_cursor_status(&self, ui: &mut egui::Ui) {
        if let Some(probe) = self.cursor {
            let [x, y, z, t] = probe.voxel;
            ui.label(stat_label("voxel"));
            ui.label(stat_value(&format!("({x}, {y}, {z}) t={t}")));
            ui.label(stat_label("value"));
            ui.label(stat_value_highlight(&format_intensity(probe.value)));
        } else {
            ui.label(stat_label("voxel"));
            ui.label(stat_value("-"));
        }
    }

    fn render_volume_summary(&self, ui: &mut egui::Ui) {
        let volume = self.viewer.volume();
        let [x, y, z, t] = volume.shape();
        let range = volume.intensity_range();
        ui.label(stat_label("shape"));
        ui.label(stat_value(&format!("{x}×{y}×{z}×{t}")));
        ui.label(stat_label("range"));
        ui.label(stat_value(&format!(
            "{} .. {}",
            format_intensity(range.min),
            format_intensity(range.max)
        )));
    }

    fn render_colormap_select(&mut self, ui: &mut egui::Ui) {
        let mut selected = self.colormap;
        egui::ComboBox::from_id_salt("colormap_select")
            .selected_text(selected.to_string())
            .show_ui(ui, |ui| {
                for cmap in Colormap::ALL {
                    ui.selectable_value(&mut selected, cmap, cmap.to_string());
                }
            });
        self.set_colormap(selected);
    }

    fn status_separator(ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);
    }
}
