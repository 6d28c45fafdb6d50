use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug)]
/// Text drawn with raylib's default font at a [`ScreenPosition`](super::screenposition::ScreenPosition).
pub struct DynamicText {
    /// The text content to render.
    pub content: String,
    /// Font size in logical screen pixels.
    pub font_size: i32,
    /// Color of the text.
    pub color: Color,
}

impl DynamicText {
    /// Creates a new DynamicText component.
    pub fn new(content: impl Into<String>, font_size: i32, color: Color) -> Self {
        Self {
            content: content.into(),
            font_size,
            color,
        }
    }
    /// Updates the text content.
    pub fn set_content(&mut self, new_content: impl Into<String>) {
        self.content = new_content.into();
    }
    /// Empties the text.
    pub fn clear(&mut self) {
        self.content.clear();
    }
}
