//! Light intensities, surface materials and point light sources.

use std::ops::{Add, AddAssign, Mul};

use csgray_math::{point, DVec3, DVec4, Vec3};

/// An RGB light intensity with every channel clamped to [0, 1].
///
/// Adding two intensities uses the screen blend `1 - (1 - a)(1 - b)` so the
/// result saturates towards white instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightIntensity(Vec3);

impl LightIntensity {
    pub const BLACK: LightIntensity = LightIntensity::rgb8(0, 0, 0);
    pub const SILVER: LightIntensity = LightIntensity::rgb8(192, 192, 192);
    pub const GRAY: LightIntensity = LightIntensity::rgb8(128, 128, 128);
    pub const WHITE: LightIntensity = LightIntensity::rgb8(255, 255, 255);
    pub const MAROON: LightIntensity = LightIntensity::rgb8(128, 0, 0);
    pub const RED: LightIntensity = LightIntensity::rgb8(255, 0, 0);
    pub const PURPLE: LightIntensity = LightIntensity::rgb8(128, 0, 128);
    pub const FUCHSIA: LightIntensity = LightIntensity::rgb8(255, 0, 255);
    pub const GREEN: LightIntensity = LightIntensity::rgb8(0, 128, 0);
    pub const LIME: LightIntensity = LightIntensity::rgb8(0, 255, 0);
    pub const OLIVE: LightIntensity = LightIntensity::rgb8(128, 128, 0);
    pub const YELLOW: LightIntensity = LightIntensity::rgb8(255, 255, 0);
    pub const NAVY: LightIntensity = LightIntensity::rgb8(0, 0, 128);
    pub const BLUE: LightIntensity = LightIntensity::rgb8(0, 0, 255);
    pub const TEAL: LightIntensity = LightIntensity::rgb8(0, 128, 128);
    pub const AQUA: LightIntensity = LightIntensity::rgb8(0, 255, 255);
    pub const GOLD: LightIntensity = LightIntensity::rgb8(255, 215, 0);

    /// Create an intensity, clamping each channel to [0, 1].
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self(Vec3::new(red, green, blue).clamp(Vec3::ZERO, Vec3::ONE))
    }

    const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self(Vec3::new(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
        ))
    }

    /// Look up one of the named HTML colors.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "silver" => Self::SILVER,
            "gray" => Self::GRAY,
            "white" => Self::WHITE,
            "maroon" => Self::MAROON,
            "red" => Self::RED,
            "purple" => Self::PURPLE,
            "fuchsia" => Self::FUCHSIA,
            "green" => Self::GREEN,
            "lime" => Self::LIME,
            "olive" => Self::OLIVE,
            "yellow" => Self::YELLOW,
            "navy" => Self::NAVY,
            "blue" => Self::BLUE,
            "teal" => Self::TEAL,
            "aqua" => Self::AQUA,
            "gold" => Self::GOLD,
            _ => return None,
        };
        Some(color)
    }

    /// Channel value (0 = red, 1 = green, 2 = blue).
    #[inline]
    pub fn at(&self, channel: usize) -> f32 {
        self.0[channel]
    }

    /// The channels as a vector.
    #[inline]
    pub fn rgb(&self) -> Vec3 {
        self.0
    }

    /// Whether every channel is zero.
    pub fn is_black(&self) -> bool {
        self.0 == Vec3::ZERO
    }

    /// Convert to 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = (self.0 * 255.0).round();
        [c.x as u8, c.y as u8, c.z as u8]
    }
}

impl From<[f32; 3]> for LightIntensity {
    fn from(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl AddAssign for LightIntensity {
    fn add_assign(&mut self, other: LightIntensity) {
        self.0 = Vec3::ONE - (Vec3::ONE - self.0) * (Vec3::ONE - other.0);
    }
}

impl Add for LightIntensity {
    type Output = LightIntensity;

    fn add(mut self, other: LightIntensity) -> LightIntensity {
        self += other;
        self
    }
}

impl Mul for LightIntensity {
    type Output = LightIntensity;

    /// Channel-wise product, e.g. a coefficient filtering a light color.
    fn mul(self, other: LightIntensity) -> LightIntensity {
        LightIntensity(self.0 * other.0)
    }
}

impl Mul<LightIntensity> for f32 {
    type Output = LightIntensity;

    fn mul(self, intensity: LightIntensity) -> LightIntensity {
        let scaled = intensity.0 * self;
        LightIntensity::new(scaled.x, scaled.y, scaled.z)
    }
}

/// Surface coefficients of a solid (Phong terms plus secondary-ray weights).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    /// Fraction of the scene's ambient light reflected
    pub ambient: LightIntensity,
    /// Lambertian response to point lights
    pub diffuse: LightIntensity,
    /// Phong highlight response to point lights
    pub specular: LightIntensity,
    /// Weight of the mirror-reflected ray
    pub reflected: LightIntensity,
    /// Weight of the refracted ray
    pub refracted: LightIntensity,
    /// Phong exponent
    pub shininess: f32,
}

impl Material {
    /// A matte material: ambient and diffuse only.
    pub fn matte(color: LightIntensity) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            ..Default::default()
        }
    }

    /// Whether secondary rays can ever contribute through this material.
    pub fn spawns_secondary_rays(&self) -> bool {
        !self.reflected.is_black() || !self.refracted.is_black()
    }
}

/// A point light in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    position: DVec4,
    intensity: LightIntensity,
}

impl LightSource {
    pub fn new(position: DVec3, intensity: LightIntensity) -> Self {
        Self {
            position: point(position.x, position.y, position.z),
            intensity,
        }
    }

    /// Light position (a homogeneous point).
    #[inline]
    pub fn position(&self) -> DVec4 {
        self.position
    }

    /// Light color.
    #[inline]
    pub fn intensity(&self) -> LightIntensity {
        self.intensity
    }
}
