//! Frame Integration Tests
//!
//! Runs the per-frame systems the binary schedules, minus anything that
//! needs a raylib window, and flushes the draw queue into a recording
//! surface instead of the screen.
//!
//! ```sh
//! cargo test --test frame_integration
//! ```

use bevy_ecs::prelude::*;
use raylib::prelude::Color;

use raybind::components::inputcontrolled::InputControlled;
use raybind::components::mapposition::MapPosition;
use raybind::components::shapevisual::ShapeVisual;
use raybind::controllers::ControllerKind;
use raybind::drawable::Drawable;
use raybind::events::controllerinput::ControllerInputEvent;
use raybind::events::render::RenderDrawableEvent;
use raybind::game;
use raybind::resources::controllerregistry::{ControllerRegistry, bind_controller};
use raybind::resources::input::{HeldInputs, Key};
use raybind::resources::windowsize::WindowSize;
use raybind::resources::worldtime::WorldTime;
use raybind::systems::controllers::{update_controller_input_messages, update_controllers};
use raybind::systems::inputsimplecontroller::input_simple_controller;
use raybind::systems::movement::{bounce_inside_window, movement};
use raybind::systems::render::{RenderSurface, flush_drawables};
use raybind::systems::shapevisual::queue_shape_draws;
use raybind::systems::time::update_world_time;

#[derive(Default)]
struct Recorder(Vec<Drawable>);

impl RenderSurface for Recorder {
    fn draw(&mut self, drawable: &Drawable) {
        self.0.push(drawable.clone());
    }
}

fn build_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(WindowSize { w: 200, h: 100 });
    world.insert_resource(HeldInputs::default());
    world.init_resource::<Messages<ControllerInputEvent>>();
    world.init_resource::<Messages<RenderDrawableEvent>>();

    let mut registry = ControllerRegistry::new();
    registry.create(
        "wasd",
        ControllerKind::Keyboard,
        [("w", "up"), ("a", "left"), ("s", "down"), ("d", "right")],
    );
    world.insert_resource(registry);
    world
}

fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_controller_input_messages,
            update_controllers,
            input_simple_controller,
            (movement, bounce_inside_window).chain(),
            queue_shape_draws,
            game::hud,
        )
            .chain(),
    );
    schedule
}

fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) -> Vec<Drawable> {
    update_world_time(world, dt);
    schedule.run(world);
    let mut recorder = Recorder::default();
    let mut queue = world.resource_mut::<Messages<RenderDrawableEvent>>();
    flush_drawables(&mut queue, &mut recorder);
    recorder.0
}

#[test]
fn controlled_entity_moves_and_is_drawn_where_it_ended_up() {
    let mut world = build_world();
    let player = world
        .spawn((
            MapPosition::new(100.0, 50.0),
            InputControlled::new(100.0),
            ShapeVisual::new(Drawable::circle(5.0).filled(Color::RED)),
        ))
        .id();
    assert!(bind_controller(&mut world, "wasd", player));
    world.resource_mut::<HeldInputs>().set_key(Key::D, true);

    let mut schedule = build_schedule();
    let drawn = run_frame(&mut world, &mut schedule, 0.5);

    assert_eq!(
        world.get::<MapPosition>(player),
        Some(&MapPosition::new(150.0, 50.0))
    );

    // The shape, then the HUD line.
    assert_eq!(drawn.len(), 2);
    let position = drawn[0].style().position;
    assert_eq!((position.x, position.y), (150.0, 50.0));
    match &drawn[1] {
        Drawable::Text { text, .. } => assert_eq!(text, "Controllers: [wasd]"),
        other => panic!("expected HUD text, got {:?}", other),
    }

    // Queue is empty after the flush.
    assert!(
        world
            .resource::<Messages<RenderDrawableEvent>>()
            .is_empty()
    );
}

#[test]
fn despawned_owner_stops_moving_and_drawing() {
    let mut world = build_world();
    let player = world
        .spawn((
            MapPosition::new(10.0, 10.0),
            InputControlled::new(10.0),
            ShapeVisual::new(Drawable::rect(4.0, 4.0)),
        ))
        .id();
    assert!(bind_controller(&mut world, "wasd", player));
    world.resource_mut::<HeldInputs>().set_key(Key::S, true);

    let mut schedule = build_schedule();
    assert_eq!(run_frame(&mut world, &mut schedule, 1.0).len(), 2);

    world.despawn(player);
    world
        .resource_mut::<Messages<ControllerInputEvent>>()
        .clear();
    let drawn = run_frame(&mut world, &mut schedule, 1.0);
    assert_eq!(drawn.len(), 1, "only the HUD remains");
    assert!(
        world
            .resource::<Messages<ControllerInputEvent>>()
            .is_empty()
    );
}

#[test]
fn bouncing_shapes_reverse_at_the_edges() {
    let mut world = build_world();
    let mut rng = fastrand::Rng::with_seed(42);
    let shapes = game::spawn_shapes(&mut world, &mut rng, 8, WindowSize { w: 200, h: 100 });
    assert_eq!(shapes.len(), 8);

    let mut schedule = build_schedule();
    for _ in 0..120 {
        let drawn = run_frame(&mut world, &mut schedule, 1.0 / 30.0);
        assert_eq!(drawn.len(), 9);
    }

    // Shapes never get further out than one frame of travel.
    for shape in shapes {
        let pos = world.get::<MapPosition>(shape).expect("alive").pos;
        assert!(pos.x > -10.0 && pos.x < 210.0, "x out of range: {}", pos.x);
        assert!(pos.y > -10.0 && pos.y < 110.0, "y out of range: {}", pos.y);
    }
}

#[test]
fn draws_from_several_writers_keep_write_order() {
    let mut world = build_world();
    world
        .resource_mut::<Messages<RenderDrawableEvent>>()
        .write(Drawable::text("before").into());

    let mut schedule = build_schedule();
    update_world_time(&mut world, 0.016);
    schedule.run(&mut world);
    world
        .resource_mut::<Messages<RenderDrawableEvent>>()
        .write(Drawable::text("after").into());

    let mut recorder = Recorder::default();
    let mut queue = world.resource_mut::<Messages<RenderDrawableEvent>>();
    assert_eq!(flush_drawables(&mut queue, &mut recorder), 3);

    let texts: Vec<&str> = recorder
        .0
        .iter()
        .filter_map(|drawable| match drawable {
            Drawable::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["before", "Controllers: [wasd]", "after"]);
}
