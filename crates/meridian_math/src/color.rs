//! RGBA color with `f32` channels.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color. Channels are always `f32`, even with double precision
/// enabled, and are usually but not necessarily within `[0, 1]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a color from four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Color from a packed `0xRRGGBBAA` value.
    #[must_use]
    pub fn from_rgba32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Packs into `0xRRGGBBAA`, clamping and rounding each channel.
    #[must_use]
    pub fn to_rgba32(self) -> u32 {
        u32::from_be_bytes([
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ])
    }

    /// Linear interpolation of all four channels.
    #[must_use]
    pub fn lerp(self, to: Self, weight: f32) -> Self {
        Self::new(
            self.r * (1.0 - weight) + to.r * weight,
            self.g * (1.0 - weight) + to.g * weight,
            self.b * (1.0 - weight) + to.b * weight,
            self.a * (1.0 - weight) + to.a * weight,
        )
    }

    /// RGB inverted, alpha kept.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self::new(1.0 - self.r, 1.0 - self.g, 1.0 - self.b, self.a)
    }

    /// Perceived brightness, ignoring alpha.
    #[must_use]
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Channel-wise approximate equality.
    #[must_use]
    pub fn is_equal_approx(self, other: Self) -> bool {
        let close = |a: f32, b: f32| {
            let tolerance = (1e-6 * a.abs()).max(1e-6);
            a == b || (a - b).abs() < tolerance
        };
        close(self.r, other.r) && close(self.g, other.g) && close(self.b, other.b) && close(self.a, other.a)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba32_round_trip() {
        let c = Color::from_rgba32(0xFF80_00C0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_rgba32(), 0xFF80_00C0);
    }

    #[test]
    fn test_to_rgba32_clamps() {
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba32(), 0xFF00_80FF);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::RED;
        let b = Color::BLUE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!(a.lerp(b, 0.5).is_equal_approx(Color::new(0.5, 0.0, 0.5, 1.0)));
    }

    #[test]
    fn test_inverted_keeps_alpha() {
        let c = Color::new(0.25, 0.5, 1.0, 0.3).inverted();
        assert_eq!(c, Color::new(0.75, 0.5, 0.0, 0.3));
    }
}
