use anyhow::{Context, Result};
use clap::Parser;
use vista_renderer::{Camera, PngWriter, SimpleRayTracer};

mod cli;
mod scene_file;

use cli::Args;
use scene_file::load_scene_file;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Loading scene from {}", args.scene.display());
    let (scene, mut config) = load_scene_file(&args.scene)?;

    if let Some(scheduling) = args.scheduling() {
        config = config.with_scheduling(scheduling);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let camera = Camera::new(config).context("Invalid camera configuration")?;
    let resolution = camera.resolution();
    let tracer = SimpleRayTracer::phong(scene);

    let mut writer = PngWriter::new(&args.output, resolution.columns, resolution.rows);
    camera
        .render(&tracer, &mut writer)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
