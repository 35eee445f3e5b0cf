//! Scene files: a scene description and its camera in one JSON document.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use vista_core::{load_json, parse_json, SceneDescription};
use vista_renderer::{CameraConfig, Scene};

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(flatten)]
    scene: SceneDescription,

    #[serde(default)]
    camera: CameraConfig,
}

/// Load and validate the scene and camera configuration stored at `path`.
pub fn load_scene_file(path: &Path) -> Result<(Scene, CameraConfig)> {
    let file: SceneFile =
        load_json(path).with_context(|| format!("Failed to load {}", path.display()))?;
    build(file)
}

/// Parse a scene file from a JSON string.
pub fn parse_scene_file(source: &str) -> Result<(Scene, CameraConfig)> {
    build(parse_json(source)?)
}

fn build(file: SceneFile) -> Result<(Scene, CameraConfig)> {
    let scene = Scene::from_description(file.scene).context("Invalid scene")?;
    Ok((scene, file.camera))
}
