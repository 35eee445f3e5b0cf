//! Camera for primary ray generation and per-pixel supersampling.

use rand::rngs::StdRng;
use rand::SeedableRng;
use vista_core::color::BLACK;
use vista_core::Color;
use vista_math::{is_zero, Point3};

use crate::board::{Board, BoardShape};
use crate::config::{Basis, CameraConfig, ConfigResult, Lens, Resolution, Scheduling, ViewPlane};
use crate::image_writer::{ImageError, ImageResult, ImageSink};
use crate::renderer::{render_pixels, ImageBuffer};
use crate::sampling::SamplingPlan;
use crate::{Ray, RayTracer};

/// An immutable, fully validated camera.
///
/// Build one with [`Camera::new`]; there is no way to obtain a camera
/// from an inconsistent configuration.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point3,
    basis: Basis,
    view_plane: ViewPlane,
    resolution: Resolution,
    anti_aliasing: Option<SamplingPlan>,
    lens: Option<Lens>,
    scheduling: Scheduling,
    progress_interval: Option<f64>,
    seed: u64,

    // Derived from the view plane and resolution
    view_center: Point3,
    pixel_width: f64,
    pixel_height: f64,
}

impl Camera {
    /// Validate `config` and build the camera.
    pub fn new(config: CameraConfig) -> ConfigResult<Self> {
        let location = config.required_location()?;
        let basis = config.required_orientation()?.basis(location)?;
        let view_plane = config.required_view_plane()?;
        let resolution = config.required_resolution()?;
        let anti_aliasing = config.anti_aliasing.plan()?;
        let lens = config.depth_of_field.lens()?;
        let scheduling = config.validated_scheduling()?;
        let progress_interval = config.validated_progress_interval()?;

        log::debug!(
            "Camera at {:?} facing {:?}, {}x{} pixels, anti-aliasing: {}, depth of field: {}",
            location,
            basis.forward,
            resolution.columns,
            resolution.rows,
            anti_aliasing.is_some(),
            lens.is_some()
        );

        Ok(Self {
            location,
            basis,
            view_plane,
            resolution,
            anti_aliasing,
            lens,
            scheduling,
            progress_interval,
            seed: config.seed,
            view_center: location + basis.forward * view_plane.distance,
            pixel_width: view_plane.width / resolution.columns as f64,
            pixel_height: view_plane.height / resolution.rows as f64,
        })
    }

    pub fn location(&self) -> Point3 {
        self.location
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn view_plane(&self) -> &ViewPlane {
        &self.view_plane
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn scheduling(&self) -> Scheduling {
        self.scheduling
    }

    pub fn progress_interval(&self) -> Option<f64> {
        self.progress_interval
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.resolution.columns as usize * self.resolution.rows as usize
    }

    /// Center of pixel `(col, row)` on the view plane. Row 0 is the top.
    pub fn pixel_center(&self, col: u32, row: u32) -> Point3 {
        let x = (col as f64 - (self.resolution.columns as f64 - 1.0) / 2.0) * self.pixel_width;
        let y = -(row as f64 - (self.resolution.rows as f64 - 1.0) / 2.0) * self.pixel_height;

        let mut center = self.view_center;
        if !is_zero(x) {
            center += self.basis.right * x;
        }
        if !is_zero(y) {
            center += self.basis.up * y;
        }
        center
    }

    /// Primary ray from the camera location through the center of pixel
    /// `(col, row)`.
    pub fn construct_ray(&self, col: u32, row: u32) -> Ray {
        self.ray_through(self.pixel_center(col, row))
    }

    /// Color of pixel `(col, row)`.
    ///
    /// Sample positions come from a generator seeded with the camera seed
    /// and the pixel index, so a pixel always renders to the same color no
    /// matter which thread computes it or in what order.
    pub fn render_pixel<T: RayTracer + ?Sized>(&self, tracer: &T, col: u32, row: u32) -> Color {
        let mut rng = self.pixel_rng(col, row);
        let center = self.pixel_center(col, row);

        match &self.anti_aliasing {
            None => self.color_toward(tracer, center, &mut rng),
            Some(plan) => {
                // Square board inscribed in the pixel; with non-square pixels
                // the margin along the longer side is not sampled
                let radius = 0.5 * self.pixel_width.min(self.pixel_height);
                let board = Board::new(
                    center,
                    self.basis.right,
                    self.basis.up,
                    radius,
                    BoardShape::Square,
                );
                plan.average(&board, &mut rng, |target, rng| {
                    self.color_toward(tracer, target, rng)
                })
            }
        }
    }

    /// Color of the pixel at row-major `index`.
    pub(crate) fn render_index<T: RayTracer + ?Sized>(&self, tracer: &T, index: usize) -> Color {
        let columns = self.resolution.columns as usize;
        self.render_pixel(tracer, (index % columns) as u32, (index / columns) as u32)
    }

    /// Render every pixel with the configured scheduling strategy, write
    /// each one to `sink` exactly once, then finish the sink.
    ///
    /// Fails before rendering if the sink has a fixed size other than the
    /// camera resolution.
    pub fn render<T, S>(&self, tracer: &T, sink: &mut S) -> ImageResult<()>
    where
        T: RayTracer + ?Sized,
        S: ImageSink + ?Sized,
    {
        let expected = (self.resolution.columns, self.resolution.rows);
        if let Some(actual) = sink.dimensions().filter(|&actual| actual != expected) {
            return Err(ImageError::SizeMismatch { expected, actual });
        }

        let pixels = render_pixels(self, tracer);
        let columns = self.resolution.columns as usize;
        for (index, color) in pixels.into_iter().enumerate() {
            sink.write_pixel((index % columns) as u32, (index / columns) as u32, color);
        }
        sink.finish()
    }

    /// Render into an in-memory image.
    pub fn render_image<T: RayTracer + ?Sized>(&self, tracer: &T) -> ImageBuffer {
        ImageBuffer::from_pixels(
            self.resolution.columns,
            self.resolution.rows,
            render_pixels(self, tracer),
        )
    }

    /// Trace toward `target`, averaging over the aperture when depth of
    /// field is on.
    fn color_toward<T: RayTracer + ?Sized>(
        &self,
        tracer: &T,
        target: Point3,
        rng: &mut StdRng,
    ) -> Color {
        let primary = self.ray_through(target);
        let Some(lens) = &self.lens else {
            return tracer.trace_ray(&primary);
        };

        let focal_point = primary.at(lens.focal_distance);
        let aperture = Board::new(
            self.location,
            self.basis.right,
            self.basis.up,
            lens.aperture,
            BoardShape::Disk,
        );
        lens.plan.average(&aperture, rng, |origin, _| {
            // The aperture lies off the focal point, so this never misses
            Ray::new(origin, focal_point - origin).map_or(BLACK, |ray| tracer.trace_ray(&ray))
        })
    }

    fn ray_through(&self, target: Point3) -> Ray {
        // The view plane sits a positive distance ahead of the location
        Ray::new_unit(self.location, (target - self.location).normalize())
    }

    fn pixel_rng(&self, col: u32, row: u32) -> StdRng {
        let index = u64::from(row) * u64::from(self.resolution.columns) + u64::from(col);
        StdRng::seed_from_u64(self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}
