//! Vista Core - renderer-agnostic scene data.
//!
//! This crate provides:
//!
//! - **Colors and materials**: `Color`, `Material`
//! - **Lights**: directional, point and spot light sources
//! - **Scene descriptions**: serde types for JSON scene files
//!
//! # Example
//!
//! ```ignore
//! use vista_core::{load_json, SceneDescription};
//!
//! let scene: SceneDescription = load_json("scene.json")?;
//! println!("{} geometries, {} lights", scene.geometries.len(), scene.lights.len());
//! ```

pub mod color;
pub mod description;
pub mod light;
pub mod material;

// Re-export commonly used types
pub use color::Color;
pub use description::{
    load_json, parse_json, DescriptionError, DescriptionResult, GeometryDescription,
    SceneDescription, ShapeDescription,
};
pub use light::{Light, LightDescription};
pub use material::Material;
