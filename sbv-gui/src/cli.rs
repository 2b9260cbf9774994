//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::app::{WindowSettings, APP_TITLE};
use crate::render::Colormap;
use crate::ui::theme::{Theme, ThemeKind};

/// View a brain volume.
#[derive(Parser, Debug)]
#[command(name = "sbv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Brain volume to view (.nii or .nii.gz)
    pub volume: PathBuf,

    /// Colormap for the slice views
    #[arg(short, long, value_enum, default_value_t = Colormap::Grayscale)]
    pub colormap: Colormap,

    /// Window color theme
    #[arg(long, value_enum, default_value_t = ThemeKind::Dark)]
    pub theme: ThemeKind,

    /// Initial window width
    #[arg(long, default_value = "1200")]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value = "600")]
    pub height: f32,

    /// Keep the file's voxel order instead of reorienting to RAS+
    #[arg(long)]
    pub no_canonical: bool,
}

impl Cli {
    /// Window settings described by the arguments.
    #[must_use]
    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            title: APP_TITLE.to_string(),
            size: [self.width, self.height],
            colormap: self.colormap,
            theme: Theme::from(self.theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sbv", "brain.nii.gz"]).unwrap();
        assert_eq!(cli.volume, PathBuf::from("brain.nii.gz"));
        assert_eq!(cli.colormap, Colormap::Grayscale);
        assert_eq!(cli.theme, ThemeKind::Dark);
        assert!(!cli.no_canonical);

        let settings = cli.window_settings();
        assert_eq!(settings.title, "SimpleBrainViewer");
        assert_eq!(settings.size, [1200.0, 600.0]);
        assert_eq!(settings.theme, Theme::dark());
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "sbv",
            "bold.nii",
            "--colormap",
            "hot",
            "--theme",
            "light",
            "--width",
            "800",
            "--no-canonical",
        ])
        .unwrap();
        assert_eq!(cli.colormap, Colormap::Hot);
        assert_eq!(cli.theme, ThemeKind::Light);
        assert!(cli.no_canonical);
        assert_eq!(cli.window_settings().size, [800.0, 600.0]);
    }

    #[test]
    fn test_volume_required() {
        assert!(Cli::try_parse_from(["sbv"]).is_err());
    }
}
