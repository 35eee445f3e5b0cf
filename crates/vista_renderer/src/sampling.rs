//! Supersampling over a board: fixed-count averaging and recursive
//! adaptive subdivision.
//!
//! Both anti-aliasing and depth of field use the same plan type; only the
//! board (pixel patch or aperture disk) and the per-sample color function
//! differ.

use rand::Rng;
use vista_core::color;
use vista_core::Color;
use vista_math::Point3;

use crate::board::{Board, StratifiedGrid};

/// How many samples to take over a board and when to stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingPlan {
    /// Average one jittered grid.
    Fixed { grid: StratifiedGrid },
    /// Subdivide into quadrants until the samples agree or the budget is
    /// spent. `max_samples` is `grid.count() · 4^d` for some `d >= 0`.
    Adaptive {
        grid: StratifiedGrid,
        max_samples: u32,
        threshold: f64,
    },
}

impl SamplingPlan {
    /// Average color over `board`, calling `color_at` once per sample point.
    pub fn average<R, F>(&self, board: &Board, rng: &mut R, mut color_at: F) -> Color
    where
        R: Rng + ?Sized,
        F: FnMut(Point3, &mut R) -> Color,
    {
        match *self {
            SamplingPlan::Fixed { grid } => sample_grid(board, grid, rng, &mut color_at).0,
            SamplingPlan::Adaptive {
                grid,
                max_samples,
                threshold,
            } => adaptive(board, 0, grid, max_samples, threshold, rng, &mut color_at),
        }
    }

    /// Largest number of samples a single board can consume.
    pub fn max_samples(&self) -> u32 {
        match *self {
            SamplingPlan::Fixed { grid } => grid.count(),
            SamplingPlan::Adaptive { max_samples, .. } => max_samples,
        }
    }
}

/// Trace one jittered grid, returning the average and the individual colors.
fn sample_grid<R, F>(
    board: &Board,
    grid: StratifiedGrid,
    rng: &mut R,
    color_at: &mut F,
) -> (Color, Vec<Color>)
where
    R: Rng + ?Sized,
    F: FnMut(Point3, &mut R) -> Color,
{
    let points = board.jittered(grid, rng);
    let colors: Vec<Color> = points.into_iter().map(|p| color_at(p, rng)).collect();
    (color::average(&colors), colors)
}

fn adaptive<R, F>(
    board: &Board,
    depth: u32,
    grid: StratifiedGrid,
    max_samples: u32,
    threshold: f64,
    rng: &mut R,
    color_at: &mut F,
) -> Color
where
    R: Rng + ?Sized,
    F: FnMut(Point3, &mut R) -> Color,
{
    let (average, colors) = sample_grid(board, grid, rng, color_at);

    let spent = u64::from(grid.count()) << (2 * depth);
    if spent >= u64::from(max_samples) || color::all_within(&colors, threshold) {
        return average;
    }

    let mut sum = Color::ZERO;
    for quadrant in board.quadrants() {
        sum += adaptive(&quadrant, depth + 1, grid, max_samples, threshold, rng, color_at);
    }
    sum / 4.0
}
