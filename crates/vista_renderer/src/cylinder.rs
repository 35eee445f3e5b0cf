//! Finite cylinder: a tube cut to `height` and closed by two caps.

use vista_math::{align_zero, is_zero, Interval, Point3, Vec3};

use crate::{GeometryError, GeometryResult, Plane, Ray, Tube};

/// A capped cylinder whose base center is the tube axis origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    bottom: Plane,
    top: Plane,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        if !height.is_finite() || align_zero(height) <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(height));
        }

        let tube = Tube::new(axis, radius)?;
        let va = axis.direction();
        let bottom = Plane::new(axis.origin(), va)?;
        let top = Plane::new(axis.at(height), va)?;

        Ok(Self {
            tube,
            height,
            bottom,
            top,
        })
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Lateral hits strictly between the caps, plus cap hits strictly
    /// inside the rim, sorted by distance.
    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        let mut hits: Vec<f64> = self
            .tube
            .hit_distances(ray, window)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| {
                let offset = self.tube.axial_offset(ray.at(*t));
                align_zero(offset) > 0.0 && align_zero(offset - self.height) < 0.0
            })
            .collect();

        let radius_squared = self.tube.radius() * self.tube.radius();
        for cap in [&self.bottom, &self.top] {
            if let Some(distances) = cap.hit_distances(ray, window) {
                let t = distances[0];
                if align_zero(ray.at(t).distance_squared(cap.point()) - radius_squared) < 0.0 {
                    hits.push(t);
                }
            }
        }

        if hits.is_empty() {
            return None;
        }
        hits.sort_by(f64::total_cmp);
        Some(hits)
    }

    /// Outward unit normal: the axis direction on the caps, radial on the side.
    pub fn normal(&self, point: Point3) -> Vec3 {
        let offset = self.tube.axial_offset(point);
        let va = self.tube.axis().direction();
        if is_zero(offset) {
            -va
        } else if is_zero(offset - self.height) {
            va
        } else {
            self.tube.normal(point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder() -> Cylinder {
        Cylinder::new(Ray::new(Vec3::ZERO, Vec3::Y).unwrap(), 1.0, 2.0).unwrap()
    }

    fn hits(origin: Vec3, direction: Vec3) -> Option<Vec<f64>> {
        let ray = Ray::new(origin, direction).unwrap();
        cylinder().hit_distances(&ray, Interval::ahead(f64::INFINITY))
    }

    #[test]
    fn test_invalid_dimensions() {
        let axis = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(
            Cylinder::new(axis, 1.0, 0.0),
            Err(GeometryError::NonPositiveHeight(0.0))
        );
        assert_eq!(
            Cylinder::new(axis, 0.0, 1.0),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
        assert!(matches!(
            Cylinder::new(axis, 1.0, f64::NAN),
            Err(GeometryError::NonPositiveHeight(_))
        ));
        assert!(matches!(
            Cylinder::new(axis, f64::NAN, 1.0),
            Err(GeometryError::NonPositiveRadius(_))
        ));
        assert!(Cylinder::new(axis, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_side_hits() {
        let t = hits(Vec3::new(-3.0, 1.0, 0.0), Vec3::X).unwrap();
        assert_eq!(t.len(), 2);
        assert!((t[0] - 2.0).abs() < 1e-9);
        assert!((t[1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_beyond_height_misses() {
        assert!(hits(Vec3::new(-3.0, 3.0, 0.0), Vec3::X).is_none());
        assert!(hits(Vec3::new(-3.0, -0.5, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn test_along_axis_hits_both_caps() {
        let t = hits(Vec3::new(0.2, -1.0, 0.3), Vec3::Y).unwrap();
        assert_eq!(t.len(), 2);
        assert!((t[0] - 1.0).abs() < 1e-9);
        assert!((t[1] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_cap_and_side() {
        // Enters through the bottom cap and leaves through the side
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 2.0, 0.0)).unwrap();
        let t = cylinder()
            .hit_distances(&ray, Interval::ahead(f64::INFINITY))
            .unwrap();
        assert_eq!(t.len(), 2);

        let entry = ray.at(t[0]);
        let exit = ray.at(t[1]);
        assert!(entry.y.abs() < 1e-9);
        assert!((exit.x - 1.0).abs() < 1e-9);
        assert!(exit.y > 0.0 && exit.y < 2.0);
    }

    #[test]
    fn test_cap_outside_rim_misses() {
        assert!(hits(Vec3::new(1.5, -1.0, 0.0), Vec3::Y).is_none());
    }

    #[test]
    fn test_normals() {
        let c = cylinder();
        assert_eq!(c.normal(Vec3::new(0.2, 0.0, 0.1)), -Vec3::Y);
        assert_eq!(c.normal(Vec3::new(0.2, 2.0, 0.1)), Vec3::Y);
        assert!((c.normal(Vec3::new(1.0, 1.0, 0.0)) - Vec3::X).length() < 1e-12);
    }
}
