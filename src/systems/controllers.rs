//! Controller systems.
//!
//! - [`update_controller_input_messages`] advances the
//!   `Messages<ControllerInputEvent>` buffers; it must run once per frame
//!   before controllers publish.
//! - [`update_controllers`] asks the
//!   [`ControllerRegistry`](crate::resources::controllerregistry::ControllerRegistry)
//!   to update every bound controller with the frame delta.
use bevy_ecs::prelude::*;

use crate::events::controllerinput::ControllerInputEvent;
use crate::resources::controllerregistry::ControllerRegistry;
use crate::resources::worldtime::WorldTime;

/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame to
/// drop messages that every reader has had a chance to see.
pub fn update_controller_input_messages(mut messages: ResMut<Messages<ControllerInputEvent>>) {
    messages.update();
}

/// Update all bound controllers. Does nothing without a registry.
pub fn update_controllers(world: &mut World) {
    let dt = world.get_resource::<WorldTime>().map_or(0.0, |time| time.delta);
    if !world.contains_resource::<ControllerRegistry>() {
        return;
    }
    world.resource_scope(|world, registry: Mut<ControllerRegistry>| {
        registry.update_all(world, dt);
    });
}
