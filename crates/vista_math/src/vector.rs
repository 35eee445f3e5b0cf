//! Checked vector operations.
//!
//! glam's own `normalize` silently produces NaN for zero vectors. Geometry
//! and camera construction need that case reported instead, so the checked
//! variants here return [`MathError::DegenerateVector`].

use thiserror::Error;

use crate::{is_zero, Vec3};

/// Errors raised by the vector kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Degenerate vector: {0}")]
    DegenerateVector(&'static str),

    #[error("Non-finite {0}")]
    NotFinite(&'static str),
}

pub type MathResult<T> = Result<T, MathError>;

/// Tolerance-aware operations on [`Vec3`].
pub trait VectorExt: Sized {
    /// Unit vector in the same direction.
    ///
    /// Fails if the length is zero within epsilon or any component is not
    /// finite.
    fn checked_normalize(self) -> MathResult<Self>;

    /// Returns the vector unchanged if every component is finite.
    fn checked_finite(self, what: &'static str) -> MathResult<Self>;

    /// Cross product that refuses to return a zero vector.
    ///
    /// Parallel and anti-parallel operands fail.
    fn checked_cross(self, other: Self) -> MathResult<Self>;

    /// True if the vector has zero length within epsilon.
    fn is_degenerate(self) -> bool;

    /// True if the two vectors are parallel or anti-parallel.
    fn is_parallel_to(self, other: Self) -> bool;

    /// True if the dot product is zero within epsilon.
    fn is_orthogonal_to(self, other: Self) -> bool;
}

impl VectorExt for Vec3 {
    fn checked_normalize(self) -> MathResult<Self> {
        if !self.is_finite() {
            return Err(MathError::DegenerateVector("cannot normalize a non-finite vector"));
        }
        let length = self.length();
        if is_zero(length) {
            return Err(MathError::DegenerateVector("cannot normalize a zero-length vector"));
        }
        Ok(self / length)
    }

    fn checked_finite(self, what: &'static str) -> MathResult<Self> {
        if !self.is_finite() {
            return Err(MathError::NotFinite(what));
        }
        Ok(self)
    }

    fn checked_cross(self, other: Self) -> MathResult<Self> {
        let cross = self.cross(other);
        if cross.is_degenerate() {
            return Err(MathError::DegenerateVector("cross product of parallel vectors"));
        }
        Ok(cross)
    }

    #[inline]
    fn is_degenerate(self) -> bool {
        is_zero(self.length())
    }

    #[inline]
    fn is_parallel_to(self, other: Self) -> bool {
        self.cross(other).is_degenerate()
    }

    #[inline]
    fn is_orthogonal_to(self, other: Self) -> bool {
        is_zero(self.dot(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-4.0, 0.5, 2.0),
            Vec3::new(0.0, 0.0, -7.0),
            Vec3::new(1e-3, 3.0, -2.0),
            Vec3::new(12.0, -8.0, 0.25),
        ]
    }

    #[test]
    fn test_normalize_unit_length_and_parallel() {
        for v in samples() {
            let n = v.checked_normalize().unwrap();
            assert!((n.length() - 1.0).abs() < TOLERANCE, "{v:?} -> {n:?}");
            assert!(n.is_parallel_to(v));
            assert!(n.dot(v) > 0.0);
        }
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert!(matches!(
            Vec3::ZERO.checked_normalize(),
            Err(MathError::DegenerateVector(_))
        ));
        assert!(Vec3::splat(1e-12).checked_normalize().is_err());
    }

    #[test]
    fn test_non_finite_vectors_fail() {
        let nan = Vec3::new(1.0, f64::NAN, 0.0);
        let inf = Vec3::new(f64::INFINITY, 0.0, 0.0);

        assert!(matches!(nan.checked_normalize(), Err(MathError::DegenerateVector(_))));
        assert!(matches!(inf.checked_normalize(), Err(MathError::DegenerateVector(_))));
        assert_eq!(nan.checked_finite("origin"), Err(MathError::NotFinite("origin")));
        assert_eq!(Vec3::X.checked_finite("origin"), Ok(Vec3::X));
    }

    #[test]
    fn test_cross_is_orthogonal_with_sine_length() {
        let vs = samples();
        for v in &vs {
            for w in &vs {
                if v.is_parallel_to(*w) {
                    continue;
                }
                let c = v.checked_cross(*w).unwrap();
                assert!((c.dot(*v) / (c.length() * v.length())).abs() < TOLERANCE);
                assert!((c.dot(*w) / (c.length() * w.length())).abs() < TOLERANCE);

                let cos = v.dot(*w) / (v.length() * w.length());
                let sin = (1.0 - cos * cos).max(0.0).sqrt();
                let expected = v.length() * w.length() * sin;
                assert!((c.length() - expected).abs() < 1e-6 * expected.max(1.0));
            }
        }
    }

    #[test]
    fn test_cross_of_parallel_vectors_fails() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(v.checked_cross(v * 2.0).is_err());
        assert!(v.checked_cross(-v).is_err());
    }

    #[test]
    fn test_orthogonality() {
        assert!(Vec3::X.is_orthogonal_to(Vec3::Y));
        assert!(!Vec3::X.is_orthogonal_to(Vec3::new(1.0, 1.0, 0.0)));
    }
}
