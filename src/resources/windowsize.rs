//! Window size resource.
//!
//! Tracks the actual window dimensions in pixels, which may differ from the
//! game's render resolution. The main loop only writes it when the window
//! was resized, so change detection on this resource means "resized".

use bevy_ecs::prelude::Resource;
use raylib::prelude::Rectangle;

/// Current window size in pixels.
///
/// This represents the actual OS window dimensions, not the game's internal
/// render resolution. Use this for letterbox/pillarbox calculations when
/// scaling the render target to fit the window.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowSize {
    /// Calculate the destination rectangle for letterboxed rendering.
    ///
    /// Given the game's render resolution, returns a rectangle that:
    /// - Preserves the game's aspect ratio
    /// - Fits within the window bounds
    /// - Centers the content (letterbox/pillarbox as needed)
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w.max(1) as f32;
        let window_h = self.h.max(1) as f32;

        let game_aspect = game_w / game_h;
        let window_aspect = window_w / window_h;

        if window_aspect > game_aspect {
            // Window is wider than game - pillarbox (black bars on sides)
            let scale = window_h / game_h;
            let scaled_w = game_w * scale;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            // Window is taller than game - letterbox (black bars top/bottom)
            let scale = window_w / game_w;
            let scaled_h = game_h * scale;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_window_is_pillarboxed() {
        let rect = WindowSize { w: 1600, h: 800 }.calculate_letterbox(400, 400);
        assert_eq!(rect.x, 400.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 800.0);
        assert_eq!(rect.height, 800.0);
    }

    #[test]
    fn test_tall_window_is_letterboxed() {
        let rect = WindowSize { w: 400, h: 600 }.calculate_letterbox(400, 400);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 100.0);
        assert_eq!(rect.width, 400.0);
        assert_eq!(rect.height, 400.0);
    }

    #[test]
    fn test_matching_aspect_fills_window() {
        let rect = WindowSize { w: 800, h: 800 }.calculate_letterbox(400, 400);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 0.0, 800.0, 800.0));
    }
}
