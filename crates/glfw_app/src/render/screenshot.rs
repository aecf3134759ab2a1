//! Framebuffer screenshots
//!
//! Captured pixels are flipped to top-row-first, encoded as PNG and written
//! as `<prefix><NNNNN>.png`. The sequence number starts past any screenshot
//! already in the directory, so earlier runs are never overwritten.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ScreenshotConfig;
use crate::render::graphics::{GraphicsBackend, GraphicsError};
use crate::render::window::WindowSize;

/// Screenshot errors
#[derive(Error, Debug)]
pub enum ScreenshotError {
    /// Reading the framebuffer failed
    #[error("Framebuffer read failed: {0}")]
    Graphics(#[from] GraphicsError),

    /// Pixel buffer does not match the requested size
    #[error("Pixel buffer holds {actual} bytes, {expected} expected")]
    BufferSize {
        /// Bytes needed for the image
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// PNG encoding or writing failed
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Output directory could not be prepared
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes sequentially numbered screenshots
#[derive(Debug, Clone)]
pub struct Screenshotter {
    directory: PathBuf,
    prefix: String,
    counter: u32,
}

impl Screenshotter {
    /// Write into `directory` with file names starting with `prefix`
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Build from the screenshot section of the configuration
    pub fn from_config(config: &ScreenshotConfig) -> Self {
        Self::new(&config.directory, config.prefix.clone())
    }

    fn path_for(&self, counter: u32) -> PathBuf {
        self.directory
            .join(format!("{}{:05}.png", self.prefix, counter))
    }

    /// Path the next screenshot will be written to
    pub fn next_path(&mut self) -> PathBuf {
        while self.path_for(self.counter).exists() {
            self.counter += 1;
        }
        self.path_for(self.counter)
    }

    /// Read the current color buffer and save it
    pub fn capture(
        &mut self,
        graphics: &mut dyn GraphicsBackend,
        size: WindowSize,
    ) -> Result<PathBuf, ScreenshotError> {
        let pixels = graphics.read_pixels(size)?;
        self.save(pixels, size)
    }

    /// Save bottom-row-first RGB8 pixels
    pub fn save(&mut self, pixels: Vec<u8>, size: WindowSize) -> Result<PathBuf, ScreenshotError> {
        let expected = size.width as usize * size.height as usize * 3;
        let actual = pixels.len();
        let image = image::RgbImage::from_raw(size.width, size.height, pixels)
            .ok_or(ScreenshotError::BufferSize { expected, actual })?;
        let image = image::imageops::flip_vertical(&image);

        std::fs::create_dir_all(&self.directory)?;
        let path = self.next_path();
        image.save_with_format(&path, image::ImageFormat::Png)?;
        self.counter += 1;

        log::info!("Screenshot written to {}", path.display());
        Ok(path)
    }
}
