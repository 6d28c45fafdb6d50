//! Render target resource for fixed-resolution rendering.
//!
//! Provides a framebuffer texture at the game's logical resolution, which is
//! then scaled to fit the actual window size. The texture always uses
//! nearest-neighbour filtering so the pixel art stays sharp when scaled.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

/// Render target for fixed-resolution rendering with scaling.
///
/// This is a NonSend resource because `RenderTexture2D` contains GPU
/// resources that must be accessed from the main thread.
pub struct RenderTarget {
    /// The underlying raylib render texture.
    pub texture: RenderTexture2D,
    /// Logical render width in pixels.
    pub game_width: u32,
    /// Logical render height in pixels.
    pub game_height: u32,
}

impl RenderTarget {
    /// Create a new render target at the specified game resolution.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;

        let target = Self {
            texture,
            game_width: width,
            game_height: height,
        };
        target.apply_nearest_filter();

        Ok(target)
    }

    fn apply_nearest_filter(&self) {
        unsafe {
            ffi::SetTextureFilter(
                self.texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }
    }

    /// Recreate the render texture at a new resolution.
    pub fn recreate(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<(), String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to recreate render texture: {}", e))?;

        self.texture = texture;
        self.game_width = width;
        self.game_height = height;
        self.apply_nearest_filter();

        Ok(())
    }

    /// Whether the texture already has the given resolution.
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.game_width == width && self.game_height == height
    }

    /// Get the source rectangle for drawing this texture.
    ///
    /// Returns a rectangle with negative height to flip the Y axis,
    /// compensating for OpenGL's inverted texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: -(self.game_height as f32), // Negative to flip Y
        }
    }
}
