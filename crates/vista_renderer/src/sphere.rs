//! Sphere primitive for ray casting.

use vista_math::{align_zero, Interval, Point3, Vec3, VectorExt};

use crate::{GeometryError, GeometryResult, Ray};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Point3, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        let center = center.checked_finite("sphere center")?;
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Roots of `|origin + t·dir - center|² = r²` inside `window`.
    ///
    /// A tangent ray (double root) is a boundary case and counts as a miss.
    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        let u = self.center - ray.origin();

        // Ray starts at the center: the only hit is on the way out
        if u.is_degenerate() {
            return window.admits(self.radius).then(|| vec![self.radius]);
        }

        let tm = ray.direction().dot(u);
        let d_squared = u.length_squared() - tm * tm;
        let th_squared = align_zero(self.radius * self.radius - d_squared);
        if th_squared <= 0.0 {
            return None;
        }

        let th = th_squared.sqrt();
        let hits: Vec<f64> = [tm - th, tm + th]
            .into_iter()
            .filter(|t| window.admits(*t))
            .collect();

        (!hits.is_empty()).then_some(hits)
    }

    /// Outward unit normal at a point on the sphere.
    pub fn normal(&self, point: Point3) -> Vec3 {
        (point - self.center) / self.radius
    }
}
