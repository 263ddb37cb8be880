//! Simple controller-to-position mover.
//!
//! Reads this frame's
//! [`ControllerInputEvent`](crate::events::controllerinput::ControllerInputEvent)s
//! and moves each addressed entity with an
//! [`InputControlled`](crate::components::inputcontrolled::InputControlled)
//! component by `speed * dt` in the named direction. Inputs a Lua script has
//! installed a handler for are left to the script.
use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::events::controllerinput::ControllerInputEvent;
#[cfg(feature = "lua")]
use crate::resources::lua_runtime::LuaRuntime;

pub fn input_simple_controller(
    mut reader: MessageReader<ControllerInputEvent>,
    mut query: Query<(&InputControlled, &mut MapPosition)>,
    #[cfg(feature = "lua")] lua: Option<NonSend<LuaRuntime>>,
) {
    #[cfg(feature = "lua")]
    let scripted = |input: &str| {
        lua.as_ref()
            .is_some_and(|runtime| runtime.has_controller_callback(input))
    };
    #[cfg(not(feature = "lua"))]
    let scripted = |_: &str| false;

    for event in reader.read() {
        if scripted(&event.input) {
            continue;
        }
        let Ok((controlled, mut position)) = query.get_mut(event.entity) else {
            continue;
        };
        let step = controlled.speed * event.dt;
        match event.input.as_str() {
            "up" => position.pos.y -= step,
            "down" => position.pos.y += step,
            "left" => position.pos.x -= step,
            "right" => position.pos.x += step,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_addressed_entity_only() {
        let mut world = World::new();
        world.init_resource::<Messages<ControllerInputEvent>>();
        let player = world
            .spawn((InputControlled::new(100.0), MapPosition::new(0.0, 0.0)))
            .id();
        let other = world
            .spawn((InputControlled::new(100.0), MapPosition::new(0.0, 0.0)))
            .id();

        {
            let mut messages = world.resource_mut::<Messages<ControllerInputEvent>>();
            for input in ["up", "left", "fire"] {
                messages.write(ControllerInputEvent {
                    entity: player,
                    input: input.to_string(),
                    dt: 0.1,
                });
            }
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(input_simple_controller);
        schedule.run(&mut world);

        assert_eq!(world.get::<MapPosition>(player), Some(&MapPosition::new(-10.0, -10.0)));
        assert_eq!(world.get::<MapPosition>(other), Some(&MapPosition::new(0.0, 0.0)));
    }
}
