//! Geometry: a shape plus the surface data shading needs.
//!
//! The set of shapes is closed. Each variant computes its own hit
//! distances; [`Geometry`] turns those into [`Intersection`] records that
//! point back at itself.

use thiserror::Error;
use vista_core::{Color, Material};
use vista_math::{Interval, MathError, Point3, Vec3};

use crate::{Cylinder, Intersectable, Intersection, Plane, Polygon, Ray, Sphere, Triangle, Tube};

/// Errors raised while constructing geometry.
///
/// Invalid shapes are rejected here so they never reach a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{0}")]
    Math(#[from] MathError),

    #[error("Radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),

    #[error("Height must be positive and finite, got {0}")]
    NonPositiveHeight(f64),

    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Polygon vertices are coincident or collinear at vertex {0}")]
    CollinearVertices(usize),

    #[error("Polygon vertex {0} is not on the plane of the first three")]
    NotCoplanar(usize),

    #[error("Polygon is not convex at vertex {0}")]
    NotConvex(usize),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// The supported shape variants.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Sorted hit distances within `window`, or `None` on a miss.
    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        match self {
            Shape::Sphere(s) => s.hit_distances(ray, window),
            Shape::Plane(p) => p.hit_distances(ray, window),
            Shape::Triangle(t) => t.hit_distances(ray, window),
            Shape::Polygon(p) => p.hit_distances(ray, window),
            Shape::Tube(t) => t.hit_distances(ray, window),
            Shape::Cylinder(c) => c.hit_distances(ray, window),
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal(&self, point: Point3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal(point),
            Shape::Plane(p) => p.normal(),
            Shape::Triangle(t) => t.normal(),
            Shape::Polygon(p) => p.normal(),
            Shape::Tube(t) => t.normal(point),
            Shape::Cylinder(c) => c.normal(point),
        }
    }
}

macro_rules! impl_into_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_into_shape!(Sphere, Plane, Triangle, Polygon, Tube, Cylinder);

/// A shape placed in the scene with its material and emission.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Geometry {
    /// Wrap a shape with the default material and no emission.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            material: Material::default(),
            emission: Color::ZERO,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal(&self, point: Point3) -> Vec3 {
        self.shape.normal(point)
    }
}

impl Intersectable for Geometry {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'a>>> {
        let distances = self.shape.hit_distances(ray, Interval::ahead(max_distance))?;
        Some(
            distances
                .into_iter()
                .map(|t| Intersection::new(self, ray.at(t), t))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_wraps_shape() {
        let geometry = Geometry::new(Sphere::new(Vec3::ZERO, 2.0).unwrap())
            .with_material(Material::diffuse(Color::splat(0.4)))
            .with_emission(Color::new(1.0, 0.0, 0.0));

        assert!(matches!(geometry.shape(), Shape::Sphere(_)));
        assert_eq!(geometry.material().kd, Color::splat(0.4));
        assert_eq!(geometry.emission(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(geometry.normal(Vec3::new(0.0, 2.0, 0.0)), Vec3::Y);
    }

    #[test]
    fn test_intersections_reference_geometry() {
        let geometry = Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap());
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();

        let hits = geometry.intersect_all(&ray).unwrap();
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(std::ptr::eq(hit.geometry, &geometry));
            assert!((hit.point - ray.at(hit.distance)).length() < 1e-12);
        }
        assert!((hits[0].point - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-9);
        assert!((hits[1].point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-9);
    }
}
