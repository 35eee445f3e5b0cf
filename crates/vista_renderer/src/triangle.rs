//! Triangle primitive: a three-vertex polygon.

use vista_math::{Interval, Point3, Vec3};

use crate::{GeometryResult, Polygon, Ray};

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Coincident or collinear vertices fail.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> GeometryResult<Self> {
        Ok(Self {
            polygon: Polygon::new(vec![v0, v1, v2])?,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        self.polygon.vertices()
    }

    pub fn normal(&self) -> Vec3 {
        self.polygon.normal()
    }

    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        self.polygon.hit_distances(ray, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryError;

    fn triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_hit() {
        // Ray pointing at triangle center
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let t = triangle()
            .hit_distances(&ray, Interval::ahead(f64::INFINITY))
            .unwrap();
        assert!((t[0] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_miss() {
        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(triangle()
            .hit_distances(&ray, Interval::ahead(f64::INFINITY))
            .is_none());

        // Ray passing beside it
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!(triangle()
            .hit_distances(&ray, Interval::ahead(f64::INFINITY))
            .is_none());
    }

    #[test]
    fn test_triangle_vertex_and_edge_are_boundary() {
        let tri = triangle();
        for origin in [Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0)] {
            let ray = Ray::new(origin, -Vec3::Z).unwrap();
            assert!(tri.hit_distances(&ray, Interval::ahead(f64::INFINITY)).is_none());
        }
    }

    #[test]
    fn test_degenerate_triangle() {
        let result = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 3.0);
        assert!(matches!(result, Err(GeometryError::CollinearVertices(_))));
    }

    #[test]
    fn test_normal() {
        assert_eq!(triangle().normal(), Vec3::Z);
    }
}
