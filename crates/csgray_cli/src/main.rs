use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::Args;
use csgray_core::{load_scene, LoadedScene};
use csgray_renderer::{render, Scene, Screen};
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let start = Instant::now();
    let LoadedScene {
        root,
        sources,
        mut settings,
        screen,
    } = load_scene(&args.scene).with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    info!("Scene loaded in {:?}", start.elapsed());

    if let Some(depth) = args.recursion {
        info!("Overriding recursion depth: {} -> {}", settings.max_depth, depth);
        settings.max_depth = depth;
    }

    let mut screen = Screen::from(screen);
    if let Some(dpi) = args.dpi {
        info!("Overriding dpi: {} -> {}", screen.dpi, dpi);
        screen = screen.with_dpi(dpi);
    }

    let scene = Scene::new(root, sources, settings);

    let start = Instant::now();
    let image = render(&scene, &screen).context("Failed to render scene")?;
    info!("Rendered in {:?}", start.elapsed());

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to save image {}", args.output.display()))?;

    Ok(())
}
