//! Runtime scene: geometry, lights and background, read-only while rendering.

use thiserror::Error;
use vista_core::{Color, GeometryDescription, Light, SceneDescription, ShapeDescription};
use vista_math::MathError;

use crate::{
    Cylinder, Geometries, Geometry, GeometryError, Intersectable, Intersection, Plane, Polygon,
    Ray, Shape, Sphere, Triangle, Tube,
};

/// Errors raised while building a scene from its description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Geometry {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("Light {index}: {source}")]
    Light {
        index: usize,
        #[source]
        source: MathError,
    },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Everything a ray can see.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    name: String,
    background: Color,
    ambient_light: Color,
    lights: Vec<Light>,
    geometries: Geometries,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: Color) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> Color {
        self.ambient_light
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn geometries(&self) -> &Geometries {
        &self.geometries
    }

    /// Nearest intersection along `ray`, if anything is hit.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let hits = self.geometries.intersect_all(ray)?;
        ray.find_closest_intersection(&hits)
    }

    /// Build a scene, validating every geometry and light.
    pub fn from_description(description: SceneDescription) -> SceneResult<Self> {
        let lights = description
            .lights
            .into_iter()
            .enumerate()
            .map(|(index, light)| {
                Light::try_from(light).map_err(|source| SceneError::Light { index, source })
            })
            .collect::<SceneResult<Vec<_>>>()?;

        let geometries = description
            .geometries
            .into_iter()
            .enumerate()
            .map(|(index, geometry)| {
                build_geometry(geometry).map_err(|source| SceneError::Geometry { index, source })
            })
            .collect::<SceneResult<Geometries>>()?;

        log::info!(
            "Scene '{}': {} geometries, {} lights",
            description.name,
            geometries.len(),
            lights.len()
        );

        Ok(Self {
            name: description.name,
            background: description.background,
            ambient_light: description.ambient_light,
            lights,
            geometries,
        })
    }
}

fn build_geometry(description: GeometryDescription) -> Result<Geometry, GeometryError> {
    let shape: Shape = match description.shape {
        ShapeDescription::Sphere { center, radius } => Sphere::new(center, radius)?.into(),
        ShapeDescription::Plane { point, normal } => Plane::new(point, normal)?.into(),
        ShapeDescription::Triangle { vertices: [a, b, c] } => Triangle::new(a, b, c)?.into(),
        ShapeDescription::Polygon { vertices } => Polygon::new(vertices)?.into(),
        ShapeDescription::Tube {
            origin,
            direction,
            radius,
        } => Tube::new(Ray::new(origin, direction)?, radius)?.into(),
        ShapeDescription::Cylinder {
            origin,
            direction,
            radius,
            height,
        } => Cylinder::new(Ray::new(origin, direction)?, radius, height)?.into(),
    };

    Ok(Geometry::new(shape)
        .with_material(description.material)
        .with_emission(description.emission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_core::parse_json;
    use vista_math::Vec3;

    const SCENE: &str = r#"{
        "name": "shapes",
        "background": [0.1, 0.2, 0.3],
        "ambient_light": [0.05, 0.05, 0.05],
        "lights": [
            { "type": "point", "intensity": [1, 1, 1], "position": [0, 5, 0], "kl": 0.1 },
            { "type": "directional", "intensity": [0.5, 0.5, 0.5], "direction": [0, -1, 0] }
        ],
        "geometries": [
            { "type": "sphere", "center": [0, 0, -5], "radius": 1,
              "material": { "kd": [0.5, 0.5, 0.5], "ks": [0.5, 0.5, 0.5], "shininess": 30 } },
            { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0] },
            { "type": "triangle", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]] },
            { "type": "polygon", "vertices": [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]] },
            { "type": "tube", "origin": [3, 0, 0], "direction": [0, 1, 0], "radius": 0.5 },
            { "type": "cylinder", "origin": [-3, 0, 0], "direction": [0, 1, 0],
              "radius": 0.5, "height": 2, "emission": [0.2, 0, 0] }
        ]
    }"#;

    #[test]
    fn test_from_description() {
        let scene = Scene::from_description(parse_json(SCENE).unwrap()).unwrap();

        assert_eq!(scene.name(), "shapes");
        assert_eq!(scene.background(), Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.lights().len(), 2);
        assert_eq!(scene.geometries().len(), 6);

        let shapes: Vec<_> = scene.geometries().iter().map(|g| g.shape()).collect();
        assert!(matches!(shapes[0], Shape::Sphere(_)));
        assert!(matches!(shapes[5], Shape::Cylinder(_)));
        assert_eq!(scene.geometries().iter().nth(5).unwrap().emission(), Color::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn test_invalid_geometry_is_reported_with_index() {
        let json = r#"{ "geometries": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
            { "type": "polygon", "vertices": [[0, 0, 0], [1, 0, 0], [2, 0, 0]] }
        ] }"#;
        let err = Scene::from_description(parse_json(json).unwrap()).unwrap_err();
        assert_eq!(
            err,
            SceneError::Geometry {
                index: 1,
                source: GeometryError::CollinearVertices(1),
            }
        );
    }

    #[test]
    fn test_invalid_light_is_reported_with_index() {
        let json = r#"{ "lights": [
            { "type": "directional", "intensity": [1, 1, 1], "direction": [0, 0, 0] }
        ] }"#;
        let err = Scene::from_description(parse_json(json).unwrap()).unwrap_err();
        assert!(matches!(err, SceneError::Light { index: 0, .. }));
    }

    #[test]
    fn test_closest_intersection() {
        let scene = Scene::new("pair")
            .with_geometry(Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0).unwrap()))
            .with_geometry(Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0).unwrap()));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let hit = scene.closest_intersection(&ray).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-9);

        let away = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(scene.closest_intersection(&away).is_none());
    }
}
