//! Vista Renderer - CPU ray casting
//!
//! Casts rays through a camera's view plane into a scene of analytic
//! shapes, with jittered anti-aliasing, depth of field and adaptive
//! supersampling. Pixels can be scheduled sequentially, over rayon, or on
//! a fixed worker pool; all three produce the same image.

mod board;
mod camera;
mod config;
mod cylinder;
mod geometry;
mod image_writer;
mod intersectable;
mod plane;
mod polygon;
mod ray;
mod renderer;
mod sampling;
mod scene;
mod shader;
mod sphere;
mod tracer;
mod triangle;
mod tube;

pub use board::{Board, BoardShape, SamplingError, SamplingResult, StratifiedGrid};
pub use camera::Camera;
pub use config::{
    is_power_of_four_multiple, AntiAliasing, Basis, CameraConfig, ConfigError, ConfigResult,
    DepthOfField, Lens, Orientation, Resolution, Scheduling, ViewPlane,
};
pub use cylinder::Cylinder;
pub use geometry::{Geometry, GeometryError, GeometryResult, Shape};
pub use image_writer::{ImageError, ImageResult, ImageSink, PngWriter};
pub use intersectable::{Geometries, Intersectable, Intersection};
pub use plane::Plane;
pub use polygon::Polygon;
pub use ray::{Ray, DELTA};
pub use renderer::{color_to_rgba, ImageBuffer};
pub use sampling::SamplingPlan;
pub use scene::{Scene, SceneError, SceneResult};
pub use shader::{PhongShader, Shader, MAX_LEVEL, MIN_K};
pub use sphere::Sphere;
pub use tracer::{RayTracer, SimpleRayTracer};
pub use triangle::Triangle;
pub use tube::Tube;

/// Re-export the math and color types used throughout the public API
pub use vista_core::Color;
pub use vista_math::{Interval, Point3, Vec3};
