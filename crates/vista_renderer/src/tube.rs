//! Infinite tube: every point at a fixed radial distance from an axis line.

use vista_math::{align_zero, is_zero, Interval, Point3, Vec3};

use crate::{GeometryError, GeometryResult, Ray};

/// An infinite circular tube around `axis`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed position of `point` along the axis.
    pub fn axial_offset(&self, point: Point3) -> f64 {
        self.axis.direction().dot(point - self.axis.origin())
    }

    /// Component of `v` perpendicular to the axis.
    fn radial(&self, v: Vec3) -> Vec3 {
        let va = self.axis.direction();
        v - va * va.dot(v)
    }

    /// Distance from `point` to the axis line.
    pub fn radial_distance(&self, point: Point3) -> f64 {
        self.radial(point - self.axis.origin()).length()
    }

    /// Roots of `|radial(P(t) - axis origin)|² = r²`.
    ///
    /// Rays parallel to the axis miss, as do tangent rays.
    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        let v_perp = self.radial(ray.direction());
        let a = v_perp.length_squared();
        if is_zero(a) {
            return None;
        }

        let dp_perp = self.radial(ray.origin() - self.axis.origin());
        let b = 2.0 * v_perp.dot(dp_perp);
        let c = dp_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(b * b - 4.0 * a * c);
        if discriminant <= 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let hits: Vec<f64> = [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
            .into_iter()
            .filter(|t| window.admits(*t))
            .collect();

        (!hits.is_empty()).then_some(hits)
    }

    /// Outward unit normal at a point on the lateral surface.
    pub fn normal(&self, point: Point3) -> Vec3 {
        self.radial(point - self.axis.origin()) / self.radius
    }
}
