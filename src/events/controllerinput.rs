//! Controller input events.
//!
//! A bound controller writes one [`ControllerInputEvent`] per held physical
//! input each time the registry updates it. The event carries the logical
//! input name from the controller's map, never the physical key.
//!
//! The events live in a `Messages<ControllerInputEvent>` queue. Call
//! [`update_controller_input_messages`](crate::systems::controllers::update_controller_input_messages)
//! once per frame so readers only see the current and previous frame.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

/// Logical input produced by a controller for the entity it is bound to.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ControllerInputEvent {
    /// Entity that owns the controller at the time of the update.
    pub entity: Entity,
    /// Logical input name, e.g. `"up"` or `"fire"`.
    pub input: String,
    /// Frame delta in seconds passed to the update.
    pub dt: f32,
}
