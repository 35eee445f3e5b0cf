//! Pixel scheduling and the in-memory image buffer.
//!
//! Three strategies render the same pixels:
//! - Sequential sweep on the calling thread
//! - Rayon parallel iterator over pixel indices
//! - Fixed worker pool pulling indices from a shared atomic counter
//!
//! Every pixel is a pure function of the camera, the tracer and its index,
//! so all three produce identical images.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use rayon::prelude::*;
use vista_core::Color;
use vista_math::Interval;

use crate::config::Scheduling;
use crate::image_writer::{ImageResult, ImageSink};
use crate::{Camera, RayTracer};

/// Convert a linear color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)) as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)) as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl ImageSink for ImageBuffer {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        self.set(col, row, color);
    }

    fn finish(&mut self) -> ImageResult<()> {
        Ok(())
    }
}

/// Shared count of finished pixels, logged every `step` pixels.
struct Progress {
    done: AtomicUsize,
    total: usize,
    step: Option<usize>,
}

impl Progress {
    fn new(total: usize, interval_percent: Option<f64>) -> Self {
        let step = interval_percent
            .map(|percent| ((total as f64 * percent / 100.0).ceil() as usize).max(1));
        Self {
            done: AtomicUsize::new(0),
            total,
            step,
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(step) = self.step {
            if done % step == 0 || done == self.total {
                log::info!("Rendered {:.1}%", done as f64 * 100.0 / self.total as f64);
            }
        }
    }

    fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

/// Render every pixel of `camera`, returned in row-major order.
pub(crate) fn render_pixels<T: RayTracer + ?Sized>(camera: &Camera, tracer: &T) -> Vec<Color> {
    let total = camera.pixel_count();
    let progress = Progress::new(total, camera.progress_interval());
    let start = Instant::now();

    let pixels = match camera.scheduling() {
        Scheduling::Sequential => {
            log::info!("Rendering {} pixels sequentially", total);
            (0..total)
                .map(|index| {
                    let color = camera.render_index(tracer, index);
                    progress.tick();
                    color
                })
                .collect()
        }
        Scheduling::Parallel => {
            log::info!(
                "Rendering {} pixels on {} rayon threads",
                total,
                rayon::current_num_threads()
            );
            (0..total)
                .into_par_iter()
                .map(|index| {
                    let color = camera.render_index(tracer, index);
                    progress.tick();
                    color
                })
                .collect()
        }
        Scheduling::WorkerPool { threads } => {
            log::info!("Rendering {} pixels on {} worker threads", total, threads);
            render_worker_pool(camera, tracer, threads, &progress)
        }
    };

    debug_assert_eq!(progress.done(), total);
    log::info!("Rendered {} pixels in {:.2?}", total, start.elapsed());
    pixels
}

/// Workers repeatedly claim the next unrendered pixel index until none
/// remain. All workers are joined before returning.
fn render_worker_pool<T: RayTracer + ?Sized>(
    camera: &Camera,
    tracer: &T,
    threads: usize,
    progress: &Progress,
) -> Vec<Color> {
    let total = camera.pixel_count();
    let next = &AtomicUsize::new(0);
    let mut pixels = vec![Color::ZERO; total];

    thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|_| {
                scope.spawn(move || {
                    let mut rendered = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        if index >= total {
                            break;
                        }
                        rendered.push((index, camera.render_index(tracer, index)));
                        progress.tick();
                    }
                    rendered
                })
            })
            .collect();

        for worker in workers {
            match worker.join() {
                Ok(rendered) => {
                    for (index, color) in rendered {
                        pixels[index] = color;
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    pixels
}
