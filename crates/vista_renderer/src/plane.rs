//! Infinite plane primitive.

use vista_math::{align_zero, is_zero, Interval, Point3, Vec3, VectorExt};

use crate::{GeometryResult, Ray};

/// A plane through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane from a point and a (not necessarily unit) normal.
    pub fn new(point: Point3, normal: Vec3) -> GeometryResult<Self> {
        Ok(Self {
            point: point.checked_finite("plane point")?,
            normal: normal.checked_normalize()?,
        })
    }

    /// Plane through three points, normal following their winding.
    ///
    /// Coincident or collinear points fail.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> GeometryResult<Self> {
        let normal = (p2 - p1).checked_cross(p3 - p1)?.checked_normalize()?;
        Ok(Self { point: p1, normal })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Solve `(P - P0)·N = 0` for the ray parameter.
    ///
    /// Rays parallel to the plane, and rays starting on it, miss.
    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        let nv = self.normal.dot(ray.direction());
        if is_zero(nv) {
            return None;
        }

        let q = self.point - ray.origin();
        if q.is_degenerate() {
            return None;
        }

        let t = align_zero(self.normal.dot(q) / nv);
        window.admits(t).then(|| vec![t])
    }
}
