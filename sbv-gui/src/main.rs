//! `SimpleBrainViewer` entry point.

mod app;
mod cli;
mod render;
mod ui;
mod util;

use anyhow::Context;
use clap::Parser;
use sbv_core::Viewer;
use sbv_io::{load_volume, LoadOptions};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = LoadOptions {
        canonical: !cli.no_canonical,
    };
    let volume = load_volume(&cli.volume, &options)
        .with_context(|| format!("failed to load {}", cli.volume.display()))?;
    let viewer = Viewer::new(volume).context("failed to set up viewer")?;

    app::run(viewer, cli.window_settings())
}
