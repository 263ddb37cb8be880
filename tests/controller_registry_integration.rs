//! Controller Registry Integration Tests
//!
//! End-to-end checks of named controllers against a real bevy_ecs world:
//! binding, per-frame updates, release on despawn and the rebinding rules.
//!
//! ```sh
//! cargo test --test controller_registry_integration
//! ```

use bevy_ecs::prelude::*;
use std::sync::Arc;

use raybind::components::controllerbinding::ControllerBinding;
use raybind::controllers::{ControllerKind, KeyboardController, lock_controller, share};
use raybind::events::controllerinput::ControllerInputEvent;
use raybind::resources::controllerregistry::{ControllerRegistry, bind_controller};
use raybind::resources::input::{HeldInputs, Key, PointerButton};
use raybind::systems::controllers::update_controllers;
use raybind::systems::time::update_world_time;

// =============================================================================
// Helpers
// =============================================================================

fn world_with_wasd() -> World {
    let mut world = World::new();
    let mut registry = ControllerRegistry::new();
    registry.create(
        "wasd",
        ControllerKind::Keyboard,
        [("w", "up"), ("a", "left")],
    );
    world.insert_resource(registry);
    world.insert_resource(HeldInputs::default());
    world
}

fn hold(world: &mut World, key: Key) {
    world.resource_mut::<HeldInputs>().set_key(key, true);
}

fn drain_events(world: &mut World) -> Vec<ControllerInputEvent> {
    world
        .get_resource_mut::<Messages<ControllerInputEvent>>()
        .map(|mut messages| messages.drain().collect())
        .unwrap_or_default()
}

fn frame(world: &mut World, dt: f32) -> Vec<ControllerInputEvent> {
    update_world_time(world, dt);
    update_controllers(world);
    drain_events(world)
}

// =============================================================================
// Publishing
// =============================================================================

#[test]
fn held_key_publishes_once_and_stops_after_despawn() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    hold(&mut world, Key::W);

    let events = frame(&mut world, 0.016);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, player);
    assert_eq!(events[0].input, "up");
    assert!((events[0].dt - 0.016).abs() < f32::EPSILON);

    world.despawn(player);
    assert!(frame(&mut world, 0.016).is_empty());

    let registry = world.resource::<ControllerRegistry>();
    let controller = registry.get("wasd").expect("still registered");
    assert!(lock_controller(controller).bound_entity().is_none());
}

#[test]
fn one_event_per_held_mapped_key() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    hold(&mut world, Key::W);
    hold(&mut world, Key::A);
    hold(&mut world, Key::S);

    let mut inputs: Vec<String> = frame(&mut world, 0.1)
        .into_iter()
        .map(|event| event.input)
        .collect();
    inputs.sort();
    assert_eq!(inputs, vec!["left".to_string(), "up".to_string()]);
}

#[test]
fn unbound_controller_publishes_nothing() {
    let mut world = world_with_wasd();
    hold(&mut world, Key::W);
    assert!(frame(&mut world, 0.016).is_empty());
}

#[test]
fn nothing_held_publishes_nothing() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    assert!(frame(&mut world, 0.016).is_empty());
}

#[test]
fn mouse_controller_publishes_for_held_buttons() {
    let mut world = World::new();
    let mut registry = ControllerRegistry::new();
    registry.create(
        "pointer",
        ControllerKind::Mouse,
        [("left", "fire"), ("right", "aim")],
    );
    world.insert_resource(registry);
    let mut held = HeldInputs::default();
    held.set_button(PointerButton::Right, true);
    world.insert_resource(held);

    let turret = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "pointer", turret));

    let events = frame(&mut world, 0.02);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].input, "aim");
    assert_eq!(events[0].entity, turret);
}

#[test]
fn each_controller_updates_once_per_frame() {
    let mut world = world_with_wasd();
    world
        .resource_mut::<ControllerRegistry>()
        .create("arrows", ControllerKind::Keyboard, [("up", "up")]);
    let p1 = world.spawn_empty().id();
    let p2 = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", p1));
    assert!(bind_controller(&mut world, "arrows", p2));
    hold(&mut world, Key::W);
    hold(&mut world, Key::Up);

    let events = frame(&mut world, 0.016);
    assert_eq!(events.len(), 2);
    assert_eq!(events.iter().filter(|e| e.entity == p1).count(), 1);
    assert_eq!(events.iter().filter(|e| e.entity == p2).count(), 1);
}

// =============================================================================
// Ownership
// =============================================================================

#[test]
fn despawn_releases_but_keeps_registration() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    world.despawn(player);

    let registry = world.resource::<ControllerRegistry>();
    assert!(registry.contains("wasd"));
    let controller = registry.get("wasd").expect("registered");
    assert!(lock_controller(controller).bound_entity().is_none());
    // Registry and nobody else.
    assert_eq!(Arc::strong_count(controller), 1);
}

#[test]
fn removed_registry_entry_stays_with_owner() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));

    let removed = world
        .resource_mut::<ControllerRegistry>()
        .remove("wasd")
        .expect("registered");
    let binding = world.get::<ControllerBinding>(player).expect("still owned");
    assert!(binding.holds(&removed));
    assert_eq!(lock_controller(&removed).bound_entity(), Some(player));

    // No longer updated by the registry.
    hold(&mut world, Key::W);
    assert!(frame(&mut world, 0.016).is_empty());
}

#[test]
fn binding_owned_controller_detaches_previous_owner() {
    let mut world = world_with_wasd();
    let first = world.spawn_empty().id();
    let second = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", first));
    assert!(bind_controller(&mut world, "wasd", second));

    assert!(world.get::<ControllerBinding>(first).is_none());
    let binding = world.get::<ControllerBinding>(second).expect("new owner");
    assert_eq!(binding.controller_name().as_deref(), Some("wasd"));

    hold(&mut world, Key::W);
    let events = frame(&mut world, 0.016);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, second);

    // The old owner dying must not release the new owner's controller.
    world.despawn(first);
    assert_eq!(frame(&mut world, 0.016).len(), 1);
}

#[test]
fn taking_new_controller_releases_old_one() {
    let mut world = world_with_wasd();
    let arrows = world
        .resource_mut::<ControllerRegistry>()
        .create("arrows", ControllerKind::Keyboard, [("up", "up")]);
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    assert!(bind_controller(&mut world, "arrows", player));

    let wasd = world
        .resource::<ControllerRegistry>()
        .get("wasd")
        .cloned()
        .expect("registered");
    assert!(lock_controller(&wasd).bound_entity().is_none());
    assert_eq!(lock_controller(&arrows).bound_entity(), Some(player));

    hold(&mut world, Key::W);
    assert!(frame(&mut world, 0.016).is_empty());
}

#[test]
fn rebinding_same_controller_is_a_no_op() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    assert!(bind_controller(&mut world, "wasd", player));

    hold(&mut world, Key::W);
    let events = frame(&mut world, 0.016);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, player);
}

#[test]
fn re_registering_name_resolves_to_new_controller() {
    let mut world = world_with_wasd();
    let first_owner = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", first_owner));

    let replacement = share(KeyboardController::from_map([("s", "down")]));
    let old = world
        .resource_mut::<ControllerRegistry>()
        .register("wasd", replacement.clone())
        .expect("replaced");
    assert_eq!(lock_controller(&replacement).name(), "wasd");

    // The first owner keeps the controller it took.
    assert!(
        world
            .get::<ControllerBinding>(first_owner)
            .expect("binding")
            .holds(&old)
    );

    let second_owner = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", second_owner));
    assert!(
        world
            .get::<ControllerBinding>(second_owner)
            .expect("binding")
            .holds(&replacement)
    );
    assert_eq!(lock_controller(&old).bound_entity(), Some(first_owner));

    hold(&mut world, Key::S);
    let events = frame(&mut world, 0.016);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, second_owner);
    assert_eq!(events[0].input, "down");
}

#[test]
fn binding_unknown_name_or_dead_entity_fails() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(!bind_controller(&mut world, "gamepad", player));
    assert!(world.get::<ControllerBinding>(player).is_none());

    world.despawn(player);
    assert!(!bind_controller(&mut world, "wasd", player));
}

#[test]
fn events_outlive_one_frame_for_readers() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    hold(&mut world, Key::A);

    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            raybind::systems::controllers::update_controller_input_messages,
            update_controllers,
        )
            .chain(),
    );
    world.init_resource::<Messages<ControllerInputEvent>>();

    schedule.run(&mut world);
    schedule.run(&mut world);

    // Two buffers: the previous frame's event and the current one.
    assert_eq!(world.resource::<Messages<ControllerInputEvent>>().len(), 2);
}

#[test]
fn events_follow_physical_input_order() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));
    hold(&mut world, Key::W);
    hold(&mut world, Key::A);

    let inputs: Vec<String> = frame(&mut world, 0.016)
        .into_iter()
        .map(|event| event.input)
        .collect();
    assert_eq!(inputs, vec!["left".to_string(), "up".to_string()]);
}

#[test]
fn binding_release_in_place_empties_component() {
    let mut world = world_with_wasd();
    let player = world.spawn_empty().id();
    assert!(bind_controller(&mut world, "wasd", player));

    let released = world
        .get_mut::<ControllerBinding>(player)
        .expect("binding")
        .release()
        .expect("held a controller");
    assert!(lock_controller(&released).bound_entity().is_none());

    let mut binding = world.get_mut::<ControllerBinding>(player).expect("binding");
    assert!(binding.controller().is_none());
    assert!(binding.release().is_none());

    hold(&mut world, Key::W);
    assert!(frame(&mut world, 0.016).is_empty());

    // Removing the empty component later is harmless.
    world.entity_mut(player).remove::<ControllerBinding>();
    assert!(bind_controller(&mut world, "wasd", player));
    assert_eq!(frame(&mut world, 0.016).len(), 1);
}
