//! RGB colors.
//!
//! Colors are linear RGB triples, nominally in `[0, 1]` per channel but
//! unbounded while light contributions accumulate.

use vista_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Black, also the "no contribution" value.
pub const BLACK: Color = Color::ZERO;

/// Arithmetic mean of a set of colors. Empty input averages to black.
pub fn average(colors: &[Color]) -> Color {
    if colors.is_empty() {
        return BLACK;
    }
    colors.iter().copied().sum::<Color>() / colors.len() as f64
}

/// Returns true if every pair of colors lies within `threshold` of each
/// other (Euclidean distance over the RGB channels).
pub fn all_within(colors: &[Color], threshold: f64) -> bool {
    colors.iter().enumerate().all(|(i, a)| {
        colors[i + 1..]
            .iter()
            .all(|b| a.distance(*b) <= threshold)
    })
}
