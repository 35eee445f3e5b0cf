//! Camera configuration and its validation.
//!
//! A [`CameraConfig`] is plain data, buildable in code or deserialized from
//! a scene file. [`Camera::new`](crate::Camera::new) checks every cross-field
//! invariant at once and refuses to build a camera from an inconsistent
//! configuration.

use serde::Deserialize;
use thiserror::Error;
use vista_math::{align_zero, MathError, Point3, Vec3, VectorExt};

use crate::board::{SamplingError, StratifiedGrid};
use crate::sampling::SamplingPlan;

/// Camera configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing required camera setting: {0}")]
    MissingField(&'static str),

    #[error("{feature} requires {field}")]
    MissingFeatureField {
        feature: &'static str,
        field: &'static str,
    },

    #[error("Forward and up vectors are not orthogonal")]
    NotOrthogonal,

    #[error("{0} must be finite")]
    NotFinite(&'static str),

    #[error("Look-at target coincides with the camera location")]
    TargetAtLocation,

    #[error("Degenerate camera basis: {0}")]
    DegenerateBasis(#[from] MathError),

    #[error("{field} supplied while {feature} is disabled")]
    ParameterWithoutFeature {
        feature: &'static str,
        field: &'static str,
    },

    #[error("Adaptive sampling enabled while {0} is disabled")]
    AdaptiveWithoutFeature(&'static str),

    #[error("{feature}: max samples {max} is not {base} times a power of 4")]
    NotPowerOfFourMultiple {
        feature: &'static str,
        base: u32,
        max: u32,
    },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite and not negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Resolution must be at least 1x1, got {columns}x{rows}")]
    InvalidResolution { columns: u32, rows: u32 },

    #[error("Worker pool needs at least one thread")]
    NoWorkers,

    #[error("{feature}: {source}")]
    Sampling {
        feature: &'static str,
        #[source]
        source: SamplingError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the camera is aimed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Explicit, mutually orthogonal forward and up vectors
    Vectors { forward: Vec3, up: Vec3 },
    /// Aim at `target`; `up` is re-orthogonalized against the view direction
    LookAt { target: Point3, up: Vec3 },
}

/// Orthonormal camera frame, `right = forward × up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Orientation {
    pub fn basis(&self, location: Point3) -> ConfigResult<Basis> {
        match *self {
            Orientation::Vectors { forward, up } => {
                let forward = forward.checked_normalize()?;
                let up = up.checked_normalize()?;
                if !forward.is_orthogonal_to(up) {
                    return Err(ConfigError::NotOrthogonal);
                }
                let right = forward.checked_cross(up)?.checked_normalize()?;
                Ok(Basis { forward, up, right })
            }
            Orientation::LookAt { target, up } => {
                if !target.is_finite() {
                    return Err(ConfigError::NotFinite("look-at target"));
                }
                let forward = (target - location)
                    .checked_normalize()
                    .map_err(|_| ConfigError::TargetAtLocation)?;
                let right = forward.checked_cross(up)?.checked_normalize()?;
                let up = right.cross(forward);
                Ok(Basis { forward, up, right })
            }
        }
    }
}

/// Size and placement of the view plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewPlane {
    pub width: f64,
    pub height: f64,
    pub distance: f64,
}

impl ViewPlane {
    fn validate(&self) -> ConfigResult<()> {
        positive("view plane width", self.width)?;
        positive("view plane height", self.height)?;
        positive("view plane distance", self.distance)
    }
}

/// Pixel grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Resolution {
    pub columns: u32,
    pub rows: u32,
}

impl Resolution {
    fn validate(&self) -> ConfigResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::InvalidResolution {
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

/// Anti-aliasing settings: multiple ray directions per pixel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AntiAliasing {
    pub enabled: bool,
    pub adaptive: bool,
    /// Samples per pixel, or per sub-area when adaptive
    pub samples: Option<u32>,
    pub max_samples: Option<u32>,
    pub color_threshold: Option<f64>,
}

impl AntiAliasing {
    pub fn fixed(samples: u32) -> Self {
        Self {
            enabled: true,
            samples: Some(samples),
            ..Default::default()
        }
    }

    pub fn adaptive(base_samples: u32, max_samples: u32, color_threshold: f64) -> Self {
        Self {
            enabled: true,
            adaptive: true,
            samples: Some(base_samples),
            max_samples: Some(max_samples),
            color_threshold: Some(color_threshold),
        }
    }

    /// Sampling plan if enabled.
    pub fn plan(&self) -> ConfigResult<Option<SamplingPlan>> {
        const NAMES: FeatureNames = FeatureNames {
            feature: "anti-aliasing",
            adaptive: "adaptive anti-aliasing",
            samples: "anti_aliasing.samples",
            max_samples: "anti_aliasing.max_samples",
            threshold: "anti_aliasing.color_threshold",
        };

        let sampling = FeatureSampling {
            adaptive: self.adaptive,
            samples: self.samples,
            max_samples: self.max_samples,
            threshold: self.color_threshold,
        };

        if !self.enabled {
            sampling.ensure_unset(&NAMES)?;
            return Ok(None);
        }
        sampling.plan(&NAMES).map(Some)
    }
}

/// Depth of field settings: ray origins spread over an aperture disk, all
/// converging on a focal point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DepthOfField {
    pub enabled: bool,
    pub adaptive: bool,
    pub aperture: Option<f64>,
    pub focal_distance: Option<f64>,
    pub samples: Option<u32>,
    pub max_samples: Option<u32>,
    pub color_threshold: Option<f64>,
}

/// Validated depth of field parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub plan: SamplingPlan,
    pub aperture: f64,
    pub focal_distance: f64,
}

impl DepthOfField {
    pub fn fixed(aperture: f64, focal_distance: f64, samples: u32) -> Self {
        Self {
            enabled: true,
            aperture: Some(aperture),
            focal_distance: Some(focal_distance),
            samples: Some(samples),
            ..Default::default()
        }
    }

    pub fn adaptive(
        aperture: f64,
        focal_distance: f64,
        base_samples: u32,
        max_samples: u32,
        color_threshold: f64,
    ) -> Self {
        Self {
            enabled: true,
            adaptive: true,
            aperture: Some(aperture),
            focal_distance: Some(focal_distance),
            samples: Some(base_samples),
            max_samples: Some(max_samples),
            color_threshold: Some(color_threshold),
        }
    }

    /// Lens parameters if enabled.
    pub fn lens(&self) -> ConfigResult<Option<Lens>> {
        const NAMES: FeatureNames = FeatureNames {
            feature: "depth of field",
            adaptive: "adaptive depth of field",
            samples: "depth_of_field.samples",
            max_samples: "depth_of_field.max_samples",
            threshold: "depth_of_field.color_threshold",
        };

        let sampling = FeatureSampling {
            adaptive: self.adaptive,
            samples: self.samples,
            max_samples: self.max_samples,
            threshold: self.color_threshold,
        };

        if !self.enabled {
            sampling.ensure_unset(&NAMES)?;
            unset(&NAMES, "depth_of_field.aperture", self.aperture.is_some())?;
            unset(&NAMES, "depth_of_field.focal_distance", self.focal_distance.is_some())?;
            return Ok(None);
        }

        let aperture = required(&NAMES, "depth_of_field.aperture", self.aperture)?;
        let focal_distance =
            required(&NAMES, "depth_of_field.focal_distance", self.focal_distance)?;
        positive("aperture", aperture)?;
        positive("focal distance", focal_distance)?;

        Ok(Some(Lens {
            plan: sampling.plan(&NAMES)?,
            aperture,
            focal_distance,
        }))
    }
}

/// Pixel scheduling strategy. All strategies produce the same image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduling {
    /// Single-threaded sweep
    Sequential,
    /// Rayon parallel iterator over all pixels
    #[default]
    Parallel,
    /// Fixed worker threads pulling pixel indices from a shared counter
    WorkerPool { threads: usize },
}

impl Scheduling {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Scheduling::WorkerPool { threads: 0 } => Err(ConfigError::NoWorkers),
            _ => Ok(()),
        }
    }
}

/// Everything needed to build a [`Camera`](crate::Camera).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub location: Option<Point3>,
    pub orientation: Option<Orientation>,
    pub view_plane: Option<ViewPlane>,
    pub resolution: Option<Resolution>,
    pub anti_aliasing: AntiAliasing,
    pub depth_of_field: DepthOfField,
    pub scheduling: Scheduling,
    /// Log progress every time this many percent of pixels complete
    pub progress_interval: Option<f64>,
    /// Base seed for the per-pixel sample generators
    pub seed: u64,
}

impl CameraConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: Point3) -> Self {
        self.location = Some(location);
        self
    }

    /// Aim with explicit forward and up vectors.
    pub fn with_direction(mut self, forward: Vec3, up: Vec3) -> Self {
        self.orientation = Some(Orientation::Vectors { forward, up });
        self
    }

    /// Aim at a target point.
    pub fn looking_at(mut self, target: Point3, up: Vec3) -> Self {
        self.orientation = Some(Orientation::LookAt { target, up });
        self
    }

    pub fn with_view_plane(mut self, width: f64, height: f64, distance: f64) -> Self {
        self.view_plane = Some(ViewPlane {
            width,
            height,
            distance,
        });
        self
    }

    pub fn with_resolution(mut self, columns: u32, rows: u32) -> Self {
        self.resolution = Some(Resolution { columns, rows });
        self
    }

    pub fn with_anti_aliasing(mut self, anti_aliasing: AntiAliasing) -> Self {
        self.anti_aliasing = anti_aliasing;
        self
    }

    pub fn with_depth_of_field(mut self, depth_of_field: DepthOfField) -> Self {
        self.depth_of_field = depth_of_field;
        self
    }

    pub fn with_scheduling(mut self, scheduling: Scheduling) -> Self {
        self.scheduling = scheduling;
        self
    }

    pub fn with_progress_interval(mut self, percent: f64) -> Self {
        self.progress_interval = Some(percent);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub(crate) fn required_location(&self) -> ConfigResult<Point3> {
        let location = self.location.ok_or(ConfigError::MissingField("location"))?;
        if !location.is_finite() {
            return Err(ConfigError::NotFinite("location"));
        }
        Ok(location)
    }

    pub(crate) fn required_orientation(&self) -> ConfigResult<Orientation> {
        self.orientation.ok_or(ConfigError::MissingField("orientation"))
    }

    pub(crate) fn required_view_plane(&self) -> ConfigResult<ViewPlane> {
        let view_plane = self.view_plane.ok_or(ConfigError::MissingField("view_plane"))?;
        view_plane.validate()?;
        Ok(view_plane)
    }

    pub(crate) fn required_resolution(&self) -> ConfigResult<Resolution> {
        let resolution = self.resolution.ok_or(ConfigError::MissingField("resolution"))?;
        resolution.validate()?;
        Ok(resolution)
    }

    pub(crate) fn validated_scheduling(&self) -> ConfigResult<Scheduling> {
        self.scheduling.validate()?;
        Ok(self.scheduling)
    }

    pub(crate) fn validated_progress_interval(&self) -> ConfigResult<Option<f64>> {
        if let Some(percent) = self.progress_interval {
            positive("progress interval", percent)?;
        }
        Ok(self.progress_interval)
    }
}

struct FeatureNames {
    feature: &'static str,
    adaptive: &'static str,
    samples: &'static str,
    max_samples: &'static str,
    threshold: &'static str,
}

/// The sampling fields shared by anti-aliasing and depth of field.
struct FeatureSampling {
    adaptive: bool,
    samples: Option<u32>,
    max_samples: Option<u32>,
    threshold: Option<f64>,
}

impl FeatureSampling {
    /// A disabled feature may not carry any sampling parameter.
    fn ensure_unset(&self, names: &FeatureNames) -> ConfigResult<()> {
        if self.adaptive {
            return Err(ConfigError::AdaptiveWithoutFeature(names.feature));
        }
        unset(names, names.samples, self.samples.is_some())?;
        unset(names, names.max_samples, self.max_samples.is_some())?;
        unset(names, names.threshold, self.threshold.is_some())
    }

    fn plan(&self, names: &FeatureNames) -> ConfigResult<SamplingPlan> {
        let samples = required(names, names.samples, self.samples)?;
        let grid = StratifiedGrid::new(samples).map_err(|source| ConfigError::Sampling {
            feature: names.feature,
            source,
        })?;

        if !self.adaptive {
            for (field, present) in [
                (names.max_samples, self.max_samples.is_some()),
                (names.threshold, self.threshold.is_some()),
            ] {
                if present {
                    return Err(ConfigError::ParameterWithoutFeature {
                        feature: names.adaptive,
                        field,
                    });
                }
            }
            return Ok(SamplingPlan::Fixed { grid });
        }

        let max_samples = required(names, names.max_samples, self.max_samples)?;
        let threshold = required(names, names.threshold, self.threshold)?;
        if !threshold.is_finite() || align_zero(threshold) < 0.0 {
            return Err(ConfigError::Negative {
                name: names.threshold,
                value: threshold,
            });
        }
        if !is_power_of_four_multiple(grid.count(), max_samples) {
            return Err(ConfigError::NotPowerOfFourMultiple {
                feature: names.adaptive,
                base: grid.count(),
                max: max_samples,
            });
        }

        Ok(SamplingPlan::Adaptive {
            grid,
            max_samples,
            threshold,
        })
    }
}

fn required<T>(names: &FeatureNames, field: &'static str, value: Option<T>) -> ConfigResult<T> {
    value.ok_or(ConfigError::MissingFeatureField {
        feature: names.feature,
        field,
    })
}

fn unset(names: &FeatureNames, field: &'static str, present: bool) -> ConfigResult<()> {
    if present {
        return Err(ConfigError::ParameterWithoutFeature {
            feature: names.feature,
            field,
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || align_zero(value) <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

/// True if `max == base · 4^d` for some `d >= 0`.
pub fn is_power_of_four_multiple(base: u32, max: u32) -> bool {
    if base == 0 || max % base != 0 {
        return false;
    }
    let ratio = max / base;
    ratio.is_power_of_two() && ratio.trailing_zeros() % 2 == 0
}
