//! Image sinks: where rendered pixels go.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use thiserror::Error;
use vista_core::Color;

use crate::renderer::color_to_rgba;

/// Errors that can occur while finishing an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sink is {actual:?} pixels but the render is {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Receives every pixel of a render exactly once, then is finished once.
pub trait ImageSink {
    /// Fixed `(columns, rows)` of the sink, if it has one.
    fn dimensions(&self) -> Option<(u32, u32)> {
        None
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color);

    /// Flush the image to its destination.
    fn finish(&mut self) -> ImageResult<()>;
}

/// Writes an 8-bit RGB PNG (or any format the extension names).
pub struct PngWriter {
    path: PathBuf,
    image: RgbImage,
}

impl PngWriter {
    pub fn new(path: impl Into<PathBuf>, columns: u32, rows: u32) -> Self {
        Self {
            path: path.into(),
            image: RgbImage::new(columns, rows),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for PngWriter {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some(self.image.dimensions())
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        let [r, g, b, _] = color_to_rgba(color);
        self.image.put_pixel(col, row, Rgb([r, g, b]));
    }

    fn finish(&mut self) -> ImageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.image.save(&self.path)?;
        log::info!(
            "Wrote {}x{} image to {}",
            self.image.width(),
            self.image.height(),
            self.path.display()
        );
        Ok(())
    }
}
