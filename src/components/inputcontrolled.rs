//! Controller-driven movement component.
//!
//! Entities with [`InputControlled`] move in response to the
//! [`ControllerInputEvent`](crate::events::controllerinput::ControllerInputEvent)s
//! their controller publishes. The
//! [`input_simple_controller`](crate::systems::inputsimplecontroller::input_simple_controller)
//! system understands the logical inputs `up`, `down`, `left` and `right`.

use bevy_ecs::prelude::Component;

/// Movement speed in world units per second for each held direction.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    pub speed: f32,
}

impl InputControlled {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}
