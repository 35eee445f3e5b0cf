//! Jittered stratified sampling over a square or disk.
//!
//! A board is a flat area in space spanned by two orthonormal axes. It is
//! used for anti-aliasing (the pixel patch on the view plane) and for
//! depth of field (the aperture disk around the camera location).

use std::f64::consts::TAU;

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use vista_math::{is_zero, Point3, Vec3};

/// Errors raised by the samplers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    #[error("Sample count {0} is not a positive perfect square")]
    InvalidSampleCount(u32),
}

pub type SamplingResult<T> = Result<T, SamplingError>;

/// Outline of the sampled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardShape {
    /// `[-radius, radius]²` along the two axes
    Square,
    /// Disk of the given radius
    Disk,
}

/// A `side × side` grid of strata, one sample per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratifiedGrid {
    side: u32,
}

impl StratifiedGrid {
    /// Grid for `count` samples. `count` must be a positive perfect square.
    pub fn new(count: u32) -> SamplingResult<Self> {
        let side = (count as f64).sqrt().round() as u32;
        if count == 0 || u64::from(side) * u64::from(side) != u64::from(count) {
            return Err(SamplingError::InvalidSampleCount(count));
        }
        Ok(Self { side })
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total number of samples drawn from this grid.
    pub fn count(&self) -> u32 {
        self.side * self.side
    }
}

/// Sampling area in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Board {
    center: Point3,
    right: Vec3,
    up: Vec3,
    radius: f64,
    shape: BoardShape,
}

impl Board {
    /// `right` and `up` must be orthonormal. `radius` is the half side for
    /// squares and the true radius for disks.
    pub fn new(center: Point3, right: Vec3, up: Vec3, radius: f64, shape: BoardShape) -> Self {
        Self {
            center,
            right,
            up,
            radius,
            shape,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Draw `count` jittered samples.
    ///
    /// Fails unless `count` is a positive perfect square.
    pub fn generate_samples<R: Rng + ?Sized>(
        &self,
        count: u32,
        rng: &mut R,
    ) -> SamplingResult<Vec<Point3>> {
        Ok(self.jittered(StratifiedGrid::new(count)?, rng))
    }

    /// One uniformly jittered sample per grid cell, in row-major cell order.
    pub fn jittered<R: Rng + ?Sized>(&self, grid: StratifiedGrid, rng: &mut R) -> Vec<Point3> {
        let side = grid.side();
        let cell = 1.0 / side as f64;
        let mut points = Vec::with_capacity(grid.count() as usize);

        for j in 0..side {
            for i in 0..side {
                let u = (i as f64 + rng.gen::<f64>()) * cell;
                let v = (j as f64 + rng.gen::<f64>()) * cell;
                let (x, y) = self.map_unit(u, v);
                points.push(self.point_at(x, y));
            }
        }

        points
    }

    /// The four quadrant boards: half the radius, centers offset by half
    /// the radius along each axis.
    pub fn quadrants(&self) -> [Board; 4] {
        let half = self.radius / 2.0;
        [(-1.0, 1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)].map(|(sx, sy)| Board {
            center: self.point_at(sx * half, sy * half),
            radius: half,
            ..*self
        })
    }

    /// Map unit-square coordinates to an offset within the board.
    fn map_unit(&self, u: f64, v: f64) -> (f64, f64) {
        match self.shape {
            BoardShape::Square => ((2.0 * u - 1.0) * self.radius, (2.0 * v - 1.0) * self.radius),
            BoardShape::Disk => {
                // sqrt keeps the areal density uniform
                let r = u.sqrt() * self.radius;
                let theta = TAU * v;
                (r * theta.cos(), r * theta.sin())
            }
        }
    }

    fn point_at(&self, x: f64, y: f64) -> Point3 {
        let mut point = self.center;
        if !is_zero(x) {
            point += self.right * x;
        }
        if !is_zero(y) {
            point += self.up * y;
        }
        point
    }
}
