//! Control row: a labelled slider above a `-` and a `+` button.

use eframe::egui;
use sbv_core::{Button, Control};

use crate::app::ControlAction;
use crate::ui::theme::Theme;

/// Render one control and report what the user did with it.
///
/// The slider shows the control's own slider position; the committed value
/// only changes once the returned action has been dispatched.
pub(crate) fn control_row(
    ui: &mut egui::Ui,
    id_salt: impl std::hash::Hash,
    control: &Control,
    theme: &Theme,
) -> Option<ControlAction> {
    let slider = control.slider();
    let mut position = slider.position();
    let mut action = None;

    ui.push_id(id_salt, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(control.label()).color(theme.text_primary));
            ui.spacing_mut().slider_width = (ui.available_width() - 56.0).max(40.0);
            let response = ui.add_enabled(
                slider.max() > 0,
                egui::Slider::new(&mut position, 0..=slider.max()).integer(),
            );
            if response.changed() {
                action = Some(ControlAction::Slide(position));
            }
        });

        ui.columns(2, |columns| {
            let width = columns[0].available_width();
            if columns[0]
                .add_sized([width, 20.0], theme.step_button("-"))
                .clicked()
            {
                action = Some(ControlAction::Press(Button::Decrement));
            }
            if columns[1]
                .add_sized([width, 20.0], theme.step_button("+"))
                .clicked()
            {
                action = Some(ControlAction::Press(Button::Increment));
            }
        });
    });

    action
}
