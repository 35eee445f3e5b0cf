//! Fixed numeric tolerance.
//!
//! Every near-zero decision in the renderer (coplanarity, collinearity,
//! orthogonality, ray parameter signs) goes through these helpers instead
//! of comparing floats exactly.

/// Tolerance below which a value is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is zero within [`EPSILON`].
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snaps values within [`EPSILON`] of zero to exactly `0.0`.
///
/// Sign tests on the result (`> 0`, `<= 0`) are then stable near zero.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}
