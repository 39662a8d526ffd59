//! Primary ray generation.

use csgray_core::ScreenSettings;
use csgray_math::{DVec3, Ray};

/// A flat image plane parallel to XY, viewed from a single eye point.
///
/// The plane spans `width` by `height` scene units from its lower-left
/// corner `position`; `dpi` pixels cover one scene unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub dpi: f64,
    pub width: f64,
    pub height: f64,
    pub position: DVec3,
    pub observer: DVec3,
}

impl Screen {
    pub fn new(dpi: f64, width: f64, height: f64, position: DVec3, observer: DVec3) -> Self {
        Self {
            dpi,
            width,
            height,
            position,
            observer,
        }
    }

    /// Set the pixel density.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Image width in pixels.
    pub fn image_width(&self) -> u32 {
        (self.dpi * self.width).ceil() as u32
    }

    /// Image height in pixels.
    pub fn image_height(&self) -> u32 {
        (self.dpi * self.height).ceil() as u32
    }

    /// Centre of pixel (`row`, `column`) on the plane, rows counted from the bottom.
    pub fn pixel_center(&self, row: u32, column: u32) -> DVec3 {
        let offset = DVec3::new(f64::from(column) + 0.5, f64::from(row) + 0.5, 0.0) / self.dpi;
        self.position + offset
    }

    /// Ray from the observer through pixel (`row`, `column`).
    ///
    /// `index` is the refractive index of the medium the observer sits in.
    pub fn primary_ray(&self, row: u32, column: u32, index: f64) -> Ray {
        let target = self.pixel_center(row, column);
        Ray::from_vec3(self.observer, target - self.observer, index)
    }
}

impl From<ScreenSettings> for Screen {
    fn from(settings: ScreenSettings) -> Self {
        Self::new(
            settings.dpi,
            settings.width,
            settings.height,
            settings.position,
            settings.observer,
        )
    }
}
