//! Kinematic body component.
//!
//! [`RigidBody`] stores the velocity the
//! [`movement`](crate::systems::movement::movement) system integrates into
//! [`MapPosition`](super::mapposition::MapPosition) every frame.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub velocity: Vector2,
}

impl RigidBody {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vector2 { x: vx, y: vy },
        }
    }
}
