use crate::align_zero;

/// A range of real numbers, used for ray parameter windows and color
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Ray parameter window `(0, max_distance]` in front of a ray origin.
    pub fn ahead(max_distance: f64) -> Self {
        Self::new(0.0, max_distance)
    }

    /// Half-open membership `(min, max]` with epsilon snapping on both ends.
    ///
    /// This is the acceptance rule for intersection distances: a root that
    /// lands on the ray origin is rejected, one that lands exactly on the
    /// far limit is kept.
    pub fn admits(&self, x: f64) -> bool {
        align_zero(x - self.min) > 0.0 && align_zero(x - self.max) <= 0.0
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_admits_half_open() {
        let window = Interval::ahead(10.0);

        assert!(!window.admits(0.0));
        assert!(!window.admits(1e-12));
        assert!(!window.admits(-1.0));
        assert!(window.admits(0.5));
        assert!(window.admits(10.0));
        assert!(window.admits(10.0 + 1e-12));
        assert!(!window.admits(10.1));
    }

    #[test]
    fn test_interval_admits_unbounded() {
        let window = Interval::ahead(f64::INFINITY);
        assert!(window.admits(1e9));
        assert!(!window.admits(0.0));
    }

    #[test]
    fn test_interval_admits_offset_window() {
        let window = Interval::new(2.0, 4.0);
        assert!(!window.admits(2.0));
        assert!(window.admits(3.0));
        assert!(window.admits(4.0));
    }

    #[test]
    fn test_interval_clamp() {
        assert_eq!(Interval::UNIT.clamp(-5.0), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.5), 0.5);
        assert_eq!(Interval::UNIT.clamp(15.0), 1.0);
    }
}
