use bevy_ecs::prelude::Component;

/// Tag component naming the kind of an entity ("player", "npc", "escape_zone", ...).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(pub &'static str);

impl Group {
    pub fn new(name: &'static str) -> Self {
        Group(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}
