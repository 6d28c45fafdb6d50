//! Color tint component.
//!
//! The [`Tint`] component modulates the color a sprite is drawn with. The
//! player is tinted red; the damage overlay uses it as its fill color.
//! The final alpha comes from [`Opacity`](super::opacity::Opacity).

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Color tint component for rendering modulation.
#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// Create an opaque tint from a `0xRRGGBB` value.
    pub fn from_hex(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
            255,
        )
    }

    /// Multiply this tint with another color (component-wise).
    pub fn multiply(&self, other: Color) -> Color {
        Color::new(
            ((self.color.r as u16 * other.r as u16) / 255) as u8,
            ((self.color.g as u16 * other.g as u16) / 255) as u8,
            ((self.color.b as u16 * other.b as u16) / 255) as u8,
            ((self.color.a as u16 * other.a as u16) / 255) as u8,
        )
    }

    /// The tint color with its alpha scaled by `opacity` (clamped to 0..=1).
    pub fn faded(&self, opacity: f32) -> Color {
        let alpha = (self.color.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color::new(self.color.r, self.color.g, self.color.b, alpha)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}
