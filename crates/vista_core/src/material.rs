//! Surface material coefficients for Phong shading.

use serde::Deserialize;

use crate::Color;

/// Phong material.
///
/// Coefficients are per channel. `kt` and `kr` drive refraction and
/// reflection; `kt` also makes a surface a partial occluder for shadows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient reflectance
    pub ka: Color,
    /// Diffuse reflectance
    pub kd: Color,
    /// Specular reflectance
    pub ks: Color,
    /// Transparency
    pub kt: Color,
    /// Mirror reflectance
    pub kr: Color,
    /// Specular exponent
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::ONE,
            kd: Color::ZERO,
            ks: Color::ZERO,
            kt: Color::ZERO,
            kr: Color::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// A matte material with the given diffuse reflectance.
    pub fn diffuse(kd: Color) -> Self {
        Self {
            kd,
            ..Default::default()
        }
    }

    /// Builder-style setter for the specular lobe.
    pub fn with_specular(mut self, ks: Color, shininess: i32) -> Self {
        self.ks = ks;
        self.shininess = shininess;
        self
    }

    /// Builder-style setter for transparency.
    pub fn with_transparency(mut self, kt: Color) -> Self {
        self.kt = kt;
        self
    }

    /// Builder-style setter for reflection.
    pub fn with_reflection(mut self, kr: Color) -> Self {
        self.kr = kr;
        self
    }
}
