//! Application theme and color definitions.
//!
//! The theme is an explicit value handed to the window at creation time and
//! applied once to the egui context.

use eframe::egui::{
    self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals,
};

/// Color palette for the application (dark theme).
pub mod dark {
    use eframe::egui::Color32;

    // Base colors
    pub const BG: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);
    pub const BG_PANEL: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);

    // Slider colors
    pub const SLIDER_TRACK: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
    pub const SLIDER_FILL: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);

    // Button colors
    pub const BUTTON_BG: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
}

/// Color palette for the application (light theme).
pub mod light {
    use eframe::egui::Color32;

    // Base colors
    pub const BG: Color32 = Color32::from_rgb(0xbb, 0xbb, 0xbb);
    pub const BG_PANEL: Color32 = Color32::from_rgb(0xd0, 0xd0, 0xd0);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

    // Slider colors
    pub const SLIDER_TRACK: Color32 = Color32::from_rgb(0xe8, 0xe8, 0xe8);
    pub const SLIDER_FILL: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);

    // Button colors
    pub const BUTTON_BG: Color32 = Color32::from_rgb(0xe8, 0xe8, 0xe8);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(0xf5, 0xf5, 0xf5);
}

/// Shared accent colors (same for both themes).
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x4a, 0x9e, 0xff);
    pub const GREEN: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);
}

/// Theme selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

/// Window colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub dark_mode: bool,
    pub background: Color32,
    pub panel: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub slider_track: Color32,
    pub slider_fill: Color32,
    pub button_bg: Color32,
    pub button_hover: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl From<ThemeKind> for Theme {
    fn from(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            dark_mode: true,
            background: dark::BG,
            panel: dark::BG_PANEL,
            text_primary: dark::TEXT_PRIMARY,
            text_muted: dark::TEXT_MUTED,
            slider_track: dark::SLIDER_TRACK,
            slider_fill: dark::SLIDER_FILL,
            button_bg: dark::BUTTON_BG,
            button_hover: dark::BUTTON_HOVER,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            dark_mode: false,
            background: light::BG,
            panel: light::BG_PANEL,
            text_primary: light::TEXT_PRIMARY,
            text_muted: light::TEXT_MUTED,
            slider_track: light::SLIDER_TRACK,
            slider_fill: light::SLIDER_FILL,
            button_bg: light::BUTTON_BG,
            button_hover: light::BUTTON_HOVER,
        }
    }

    /// Build egui visuals for this theme.
    #[must_use]
    pub fn visuals(&self) -> Visuals {
        let mut visuals = if self.dark_mode {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.window_fill = self.panel;
        visuals.panel_fill = self.background;
        visuals.faint_bg_color = self.panel;
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.text_primary);

        visuals.widgets.noninteractive.bg_fill = self.panel;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);
        visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

        visuals.widgets.inactive.bg_fill = self.slider_track;
        visuals.widgets.inactive.weak_bg_fill = self.button_bg;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.rounding = Rounding::same(4.0);

        visuals.widgets.hovered.bg_fill = self.button_hover;
        visuals.widgets.hovered.weak_bg_fill = self.button_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent::BLUE);
        visuals.widgets.hovered.rounding = Rounding::same(4.0);

        visuals.widgets.active.bg_fill = self.slider_fill;
        visuals.widgets.active.weak_bg_fill = self.button_hover;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent::BLUE);
        visuals.widgets.active.rounding = Rounding::same(4.0);

        visuals.slider_trailing_fill = true;
        visuals.selection.bg_fill = self.slider_fill;
        visuals.selection.stroke = Stroke::new(1.0, self.text_primary);

        visuals
    }

    /// Apply visuals, fonts and spacing to the context.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
        configure_fonts_and_spacing(ctx);
    }

    /// A `-`/`+` step button.
    pub fn step_button<'a>(&self, text: &'a str) -> egui::Button<'a> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.button_bg)
            .rounding(Rounding::same(4.0))
    }
}

/// Configure fonts and spacing (theme-independent).
fn configure_fonts_and_spacing(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Use monospace for everything
    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);

    ctx.set_style(style);
}

/// Create a stat label (left column).
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).weak()
}

/// Create a stat value (right column).
pub fn stat_value(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0)
}

/// Create a highlighted stat value (cursor readout).
pub fn stat_value_highlight(text: &str) -> egui::RichText {
    egui::RichText::new(text)
        .size(11.0)
        .color(accent::GREEN)
        .strong()
}
