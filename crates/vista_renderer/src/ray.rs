//! Ray type for ray casting.
//!
//! A ray is defined by an origin point and a unit direction vector. Because
//! the direction is normalized, the ray parameter `t` is also the distance
//! from the origin.

use vista_math::{MathResult, Point3, Vec3, VectorExt};

use crate::Intersection;

/// Origin shift applied to secondary rays so they do not re-hit the
/// surface they start on.
pub const DELTA: f64 = 1e-4;

/// A ray with origin and unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    origin: Point3,
    /// Direction vector (unit length)
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails for a zero-length direction or a non-finite origin.
    pub fn new(origin: Point3, direction: Vec3) -> MathResult<Self> {
        let origin = origin.checked_finite("ray origin")?;
        Ok(Self::new_unit(origin, direction.checked_normalize()?))
    }

    /// Create a ray from a direction the caller already normalized.
    #[inline]
    pub(crate) fn new_unit(origin: Point3, direction: Vec3) -> Self {
        debug_assert!(
            (direction.length() - 1.0).abs() < 1e-6,
            "ray direction must be unit length, got {direction:?}"
        );
        Self { origin, direction }
    }

    /// Create a ray starting at `head`, nudged by [`DELTA`] along `normal`
    /// to the side `direction` points to.
    pub fn with_offset(head: Point3, direction: Vec3, normal: Vec3) -> MathResult<Self> {
        let direction = direction.checked_normalize()?;
        let shift = if normal.dot(direction) > 0.0 { DELTA } else { -DELTA };
        Ok(Self::new_unit(head + normal * shift, direction))
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the ray's direction vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    ///
    /// Negative `t` is allowed and lands behind the origin.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// The candidate with the smallest non-negative distance.
    ///
    /// Returns `None` for an empty candidate set. Equal distances keep the
    /// first candidate found.
    pub fn find_closest_intersection<'a>(
        &self,
        candidates: &[Intersection<'a>],
    ) -> Option<Intersection<'a>> {
        candidates
            .iter()
            .filter(|hit| hit.distance >= 0.0)
            .fold(None, |closest: Option<&Intersection<'a>>, hit| match closest {
                Some(best) if best.distance <= hit.distance => Some(best),
                _ => Some(hit),
            })
            .copied()
    }
}
