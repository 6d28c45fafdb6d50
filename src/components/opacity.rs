//! Opacity component.
//!
//! Visibility in the game is expressed as an alpha value in `0.0..=1.0`:
//! the escape zone is "hidden" at 0 and "interactable" at 1, the player
//! fades to 0 when exploding, the overlay flashes to 0.7. Opacity tweens
//! animate this component.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Opacity(1.0)
    }
}

impl Opacity {
    pub fn hidden() -> Self {
        Opacity(0.0)
    }

    pub fn is_hidden(&self) -> bool {
        self.0 <= 0.0
    }

    pub fn is_opaque(&self) -> bool {
        self.0 >= 1.0
    }
}
