//! Render loop and image output.
//!
//! One primary ray per pixel, traced through the scene; no anti-aliasing.

use std::path::Path;

use csgray_core::LightIntensity;
use thiserror::Error;

use crate::{Scene, Screen};

/// Errors that can occur while producing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image of {width}x{height} pixels is too large")]
    TooLarge { width: u32, height: u32 },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Image buffer storing render output, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<LightIntensity>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    ///
    /// The pixel count must fit in a `u32`.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let count = width
            .checked_mul(height)
            .ok_or(RenderError::TooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            pixels: vec![LightIntensity::BLACK; count as usize],
        })
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> LightIntensity {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, color: LightIntensity) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGB bytes, 255 per unit intensity.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(LightIntensity::to_rgb8).collect()
    }

    /// Save as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let path = path.as_ref();
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        let image = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save_with_format(path, image::ImageFormat::Png)?;

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Trace the primary ray of pixel (`row`, `column`), rows counted from the bottom.
pub fn render_pixel(scene: &Scene, screen: &Screen, row: u32, column: u32) -> LightIntensity {
    let ray = screen.primary_ray(row, column, scene.settings().index);
    scene.trace_ray(&ray, 0)
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded, row by row from the bottom of the screen. Fails before
/// tracing anything when the screen resolution is too large to store.
pub fn render(scene: &Scene, screen: &Screen) -> RenderResult<ImageBuffer> {
    let width = screen.image_width();
    let height = screen.image_height();
    let mut image = ImageBuffer::new(width, height)?;

    log::info!(
        "Rendering {}x{} pixels, {} light sources, max depth {}",
        width,
        height,
        scene.sources().len(),
        scene.settings().max_depth
    );

    let progress_step = (height / 10).max(1);
    for row in 0..height {
        for column in 0..width {
            let color = render_pixel(scene, screen, row, column);
            image.set(column, height - row - 1, color);
        }

        if (row + 1) % progress_step == 0 || row + 1 == height {
            log::info!("Rendered {}/{} rows", row + 1, height);
        }
    }

    Ok(image)
}
