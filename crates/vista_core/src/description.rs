//! JSON scene descriptions.
//!
//! These types mirror the scene file layout one to one. They carry no
//! validation beyond what serde enforces; the renderer checks geometric
//! invariants when it builds the runtime scene from them.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use vista_math::{Point3, Vec3};

use crate::{Color, LightDescription, Material};

/// Errors that can occur while loading a description file.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Geometry parameters, tagged by `"type"` in the file.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        center: Point3,
        radius: f64,
    },
    Plane {
        point: Point3,
        normal: Vec3,
    },
    Triangle {
        vertices: [Point3; 3],
    },
    Polygon {
        vertices: Vec<Point3>,
    },
    Tube {
        origin: Point3,
        direction: Vec3,
        radius: f64,
    },
    Cylinder {
        origin: Point3,
        direction: Vec3,
        radius: f64,
        height: f64,
    },
}

/// One geometry entry: shape plus surface appearance.
#[derive(Clone, Debug, Deserialize)]
pub struct GeometryDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,

    #[serde(default)]
    pub material: Material,

    #[serde(default)]
    pub emission: Color,
}

/// A complete scene: what is lit, by what, against which background.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Scene name (for logging)
    pub name: String,

    /// Color returned for rays that hit nothing
    pub background: Color,

    /// Ambient light intensity
    pub ambient_light: Color,

    pub lights: Vec<LightDescription>,

    pub geometries: Vec<GeometryDescription>,
}

/// Parse any description type from a JSON string.
pub fn parse_json<T: DeserializeOwned>(source: &str) -> DescriptionResult<T> {
    Ok(serde_json::from_str(source)?)
}

/// Load any description type from a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> DescriptionResult<T> {
    let path = path.as_ref();
    log::debug!("Reading description from {}", path.display());
    let source = fs::read_to_string(path)?;
    parse_json(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "name": "two spheres",
        "background": [0.1, 0.1, 0.2],
        "ambient_light": [0.15, 0.15, 0.15],
        "lights": [
            { "type": "directional", "intensity": [1, 1, 1], "direction": [0, -1, -1] }
        ],
        "geometries": [
            { "type": "sphere", "center": [0, 0, -50], "radius": 20,
              "material": { "kd": [0.5, 0.5, 0.5], "ks": [0.5, 0.5, 0.5], "shininess": 100 },
              "emission": [0.2, 0, 0] },
            { "type": "polygon", "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]] },
            { "type": "cylinder", "origin": [0, 0, 0], "direction": [0, 1, 0],
              "radius": 1, "height": 2 }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene: SceneDescription = parse_json(SCENE).unwrap();

        assert_eq!(scene.name, "two spheres");
        assert_eq!(scene.background, Color::new(0.1, 0.1, 0.2));
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.geometries.len(), 3);

        let sphere = &scene.geometries[0];
        assert!(matches!(sphere.shape, ShapeDescription::Sphere { radius, .. } if radius == 20.0));
        assert_eq!(sphere.material.shininess, 100);
        assert_eq!(sphere.emission, Color::new(0.2, 0.0, 0.0));

        let polygon = &scene.geometries[1];
        assert!(matches!(
            &polygon.shape,
            ShapeDescription::Polygon { vertices } if vertices.len() == 4
        ));
        assert_eq!(polygon.material, Material::default());
        assert_eq!(polygon.emission, Color::ZERO);
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let scene: SceneDescription = parse_json("{}").unwrap();
        assert!(scene.geometries.is_empty());
        assert_eq!(scene.background, Color::ZERO);
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let result: DescriptionResult<SceneDescription> =
            parse_json(r#"{ "geometries": [ { "type": "torus" } ] }"#);
        assert!(matches!(result, Err(DescriptionError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result: DescriptionResult<SceneDescription> = load_json("/nonexistent/scene.json");
        assert!(matches!(result, Err(DescriptionError::Io(_))));
    }
}
