//! Light sources.

use serde::Deserialize;
use vista_math::{is_zero, MathError, MathResult, Point3, Vec3, VectorExt};

use crate::color::{Color, BLACK};

/// A light source illuminating the scene.
///
/// Directions are stored normalized; use the constructors rather than
/// building variants by hand.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Light arriving from infinitely far away along `direction`.
    Directional { intensity: Color, direction: Vec3 },
    /// Omnidirectional light with distance attenuation `kc + kl·d + kq·d²`.
    Point {
        intensity: Color,
        position: Point3,
        kc: f64,
        kl: f64,
        kq: f64,
    },
    /// Point light whose intensity falls off away from `direction`.
    Spot {
        intensity: Color,
        position: Point3,
        direction: Vec3,
        kc: f64,
        kl: f64,
        kq: f64,
        narrow_beam: f64,
    },
}

impl Light {
    pub fn directional(intensity: Color, direction: Vec3) -> MathResult<Self> {
        Ok(Self::Directional {
            intensity,
            direction: direction.checked_normalize()?,
        })
    }

    /// Point light with no attenuation.
    pub fn point(intensity: Color, position: Point3) -> Self {
        Self::Point {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Spot light with no attenuation and a plain cosine falloff.
    pub fn spot(intensity: Color, position: Point3, direction: Vec3) -> MathResult<Self> {
        Ok(Self::Spot {
            intensity,
            position,
            direction: direction.checked_normalize()?,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            narrow_beam: 1.0,
        })
    }

    /// Replace the attenuation coefficients. No effect on directional lights.
    pub fn with_attenuation(mut self, constant: f64, linear: f64, quadratic: f64) -> Self {
        match &mut self {
            Self::Directional { .. } => {}
            Self::Point { kc, kl, kq, .. } | Self::Spot { kc, kl, kq, .. } => {
                *kc = constant;
                *kl = linear;
                *kq = quadratic;
            }
        }
        self
    }

    /// Sharpen a spot light's cone. No effect on other lights.
    pub fn with_narrow_beam(mut self, exponent: f64) -> Self {
        if let Self::Spot { narrow_beam, .. } = &mut self {
            *narrow_beam = exponent;
        }
        self
    }

    /// Intensity reaching `point`.
    ///
    /// An attenuation factor that evaluates to zero yields black rather
    /// than an infinite intensity.
    pub fn intensity_at(&self, point: Point3) -> Color {
        match *self {
            Self::Directional { intensity, .. } => intensity,
            Self::Point {
                intensity,
                position,
                kc,
                kl,
                kq,
            } => attenuate(intensity, position.distance(point), kc, kl, kq),
            Self::Spot {
                intensity,
                position,
                direction,
                kc,
                kl,
                kq,
                narrow_beam,
            } => {
                let Ok(l) = (point - position).checked_normalize() else {
                    return BLACK;
                };
                let factor = direction.dot(l).max(0.0).powf(narrow_beam);
                attenuate(intensity * factor, position.distance(point), kc, kl, kq)
            }
        }
    }

    /// Unit vector from the light towards `point`, or `None` when the point
    /// sits on the light itself.
    pub fn direction_to(&self, point: Point3) -> Option<Vec3> {
        match *self {
            Self::Directional { direction, .. } => Some(direction),
            Self::Point { position, .. } | Self::Spot { position, .. } => {
                (point - position).checked_normalize().ok()
            }
        }
    }

    /// Distance from the light to `point`. Infinite for directional lights.
    pub fn distance_to(&self, point: Point3) -> f64 {
        match *self {
            Self::Directional { .. } => f64::INFINITY,
            Self::Point { position, .. } | Self::Spot { position, .. } => {
                position.distance(point)
            }
        }
    }
}

fn attenuate(intensity: Color, distance: f64, kc: f64, kl: f64, kq: f64) -> Color {
    let factor = kc + kl * distance + kq * distance * distance;
    if is_zero(factor) {
        return BLACK;
    }
    intensity / factor
}

fn default_kc() -> f64 {
    1.0
}

fn default_narrow_beam() -> f64 {
    1.0
}

/// Serialized form of a [`Light`].
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightDescription {
    Directional {
        intensity: Color,
        direction: Vec3,
    },
    Point {
        intensity: Color,
        position: Point3,
        #[serde(default = "default_kc")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
    },
    Spot {
        intensity: Color,
        position: Point3,
        direction: Vec3,
        #[serde(default = "default_kc")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default = "default_narrow_beam")]
        narrow_beam: f64,
    },
}

impl TryFrom<LightDescription> for Light {
    type Error = MathError;

    fn try_from(description: LightDescription) -> MathResult<Self> {
        Ok(match description {
            LightDescription::Directional {
                intensity,
                direction,
            } => Light::directional(intensity, direction)?,
            LightDescription::Point {
                intensity,
                position,
                kc,
                kl,
                kq,
            } => Light::point(intensity, position).with_attenuation(kc, kl, kq),
            LightDescription::Spot {
                intensity,
                position,
                direction,
                kc,
                kl,
                kq,
                narrow_beam,
            } => Light::spot(intensity, position, direction)?
                .with_attenuation(kc, kl, kq)
                .with_narrow_beam(narrow_beam),
        })
    }
}
