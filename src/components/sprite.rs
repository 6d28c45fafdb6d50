use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

/// Sprite is identified by a texture key and its size in map pixels.
/// The origin selects the pivot point (in pixels, before scaling) relative to the
/// texture's top-left, used for placement when rendering.
/// When the texture is not loaded the renderer draws a `fallback` coloured box instead.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub origin: Vector2,
    pub scale: f32,
    pub fallback: Color,
}

impl Sprite {
    /// Sprite with its pivot in the centre of the frame.
    pub fn centered(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            origin: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            scale: 1.0,
            fallback: Color::WHITE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_fallback(mut self, color: Color) -> Self {
        self.fallback = color;
        self
    }

    /// Size on screen after scaling.
    pub fn scaled_size(&self) -> (f32, f32) {
        (self.width * self.scale, self.height * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_origin() {
        let s = Sprite::centered("door", 32.0, 48.0);
        assert_eq!(s.origin.x, 16.0);
        assert_eq!(s.origin.y, 24.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn test_scaled_size() {
        let s = Sprite::centered("door", 32.0, 48.0).with_scale(0.5);
        assert_eq!(s.scaled_size(), (16.0, 24.0));
    }
}
