//! Demo scene.
//!
//! A handful of shapes bounce around the window while one player shape is
//! moved by the first controller declared in the configuration. Scripts can
//! create more controllers, take them for other entities and draw on top.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::{info, warn};
use raylib::prelude::*;

use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::shapevisual::ShapeVisual;
use crate::drawable::{DrawShape, DrawStyle, Drawable};
use crate::events::render::RenderDrawableEvent;
use crate::resources::appconfig::AppConfig;
use crate::resources::controllerregistry::{ControllerRegistry, bind_controller};
use crate::resources::windowsize::WindowSize;

/// Player speed in pixels per second.
pub const PLAYER_SPEED: f32 = 240.0;
const MIN_SHAPE_SPEED: f32 = 40.0;
const MAX_SHAPE_SPEED: f32 = 160.0;
const HUD_TEXT_SIZE: f32 = 18.0;

fn random_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

fn random_color(rng: &mut Rng) -> Color {
    Color::new(rng.u8(64..=255), rng.u8(64..=255), rng.u8(64..=255), 255)
}

/// Spawn `count` bouncing shapes at random positions inside `bounds`.
pub fn spawn_shapes(world: &mut World, rng: &mut Rng, count: u32, bounds: WindowSize) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let drawable = if rng.bool() {
            let radius = random_range(rng, 6.0, 20.0);
            let mut circle = Drawable::circle(radius).filled(random_color(rng));
            circle.style_mut().origin = Vector2 {
                x: radius,
                y: radius,
            };
            circle
        } else {
            let (w, h) = (random_range(rng, 12.0, 40.0), random_range(rng, 8.0, 30.0));
            let mut rect = Drawable::rect(w, h)
                .filled(random_color(rng))
                .rotated(random_range(rng, 0.0, 90.0));
            rect.style_mut().origin = Vector2 { x: w / 2.0, y: h / 2.0 };
            rect
        };

        let speed = random_range(rng, MIN_SHAPE_SPEED, MAX_SHAPE_SPEED);
        let angle = random_range(rng, 0.0, std::f32::consts::TAU);
        let entity = world
            .spawn((
                MapPosition::new(
                    random_range(rng, 0.0, bounds.w as f32),
                    random_range(rng, 0.0, bounds.h as f32),
                ),
                RigidBody::new(speed * angle.cos(), speed * angle.sin()),
                ShapeVisual::new(drawable),
            ))
            .id();
        spawned.push(entity);
    }
    spawned
}

/// Spawn the player shape in the middle of `bounds`.
pub fn spawn_player(world: &mut World, bounds: WindowSize) -> Entity {
    let body = Drawable::Shape {
        shape: DrawShape::Rect {
            width: 24.0,
            height: 24.0,
        },
        style: DrawStyle {
            fill_color: Color::GOLD,
            outline_color: Color::WHITE,
            outline_thickness: 2.0,
            origin: Vector2 { x: 12.0, y: 12.0 },
            ..DrawStyle::default()
        },
    };
    world
        .spawn((
            MapPosition::new(bounds.w as f32 / 2.0, bounds.h as f32 / 2.0),
            InputControlled::new(PLAYER_SPEED),
            ShapeVisual::new(body),
        ))
        .id()
}

/// Build the scene.
///
/// Registers the configured controllers, spawns the shapes and the player
/// and binds the first configured controller to the player. Returns the
/// player entity.
pub fn setup(world: &mut World, rng: &mut Rng) -> Entity {
    let config = world.get_resource::<AppConfig>().cloned().unwrap_or_default();
    let bounds = world
        .get_resource::<WindowSize>()
        .copied()
        .unwrap_or(WindowSize {
            w: config.window_width as i32,
            h: config.window_height as i32,
        });

    {
        let mut registry = world.get_resource_or_insert_with(ControllerRegistry::default);
        let count = config.register_controllers(&mut registry);
        info!("Registered {} configured controller(s)", count);
    }

    spawn_shapes(world, rng, config.shape_count, bounds);
    let player = spawn_player(world, bounds);

    match config.controllers.first() {
        Some(spec) => {
            if !bind_controller(world, &spec.name, player) {
                warn!("Player could not take controller '{}'", spec.name);
            }
        }
        None => info!("No controllers configured; the player stays put"),
    }

    player
}

/// Queue a line of text listing the registered controllers.
pub fn hud(registry: Res<ControllerRegistry>, mut writer: MessageWriter<RenderDrawableEvent>) {
    let text = format!("Controllers: [{}]", registry.names().join(", "));
    let mut drawable = Drawable::text(text).at(10.0, 10.0);
    if let Drawable::Text { size, .. } = &mut drawable {
        *size = HUD_TEXT_SIZE;
    }
    writer.write(drawable.into());
}
