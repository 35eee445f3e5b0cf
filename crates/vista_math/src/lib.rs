//! Vista math kernel.
//!
//! Double precision points and vectors on top of glam, plus the tolerance
//! helpers every intersection and sampling decision goes through.

// Points and vectors share glam's f64 vector type
pub use glam::DVec3 as Vec3;

/// A location in space. Same representation as [`Vec3`], named for intent.
pub type Point3 = Vec3;

mod epsilon;
mod interval;
mod vector;

pub use epsilon::{align_zero, is_zero, EPSILON};
pub use interval::Interval;
pub use vector::{MathError, MathResult, VectorExt};
