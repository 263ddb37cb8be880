//! Movement systems for the demo shapes.
//!
//! - [`movement`] integrates [`RigidBody`] velocity into [`MapPosition`].
//! - [`bounce_inside_window`] reverses velocity on any axis where an entity
//!   has left the window and is still moving away from it.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        position.pos = position.pos + rigidbody.velocity.scale_by(time.delta);
    }
}

pub fn bounce_inside_window(
    mut query: Query<(&MapPosition, &mut RigidBody)>,
    window: Res<WindowSize>,
) {
    let (w, h) = (window.w as f32, window.h as f32);
    for (position, mut rigidbody) in query.iter_mut() {
        let v = rigidbody.velocity;
        if (position.pos.x < 0.0 && v.x < 0.0) || (position.pos.x > w && v.x > 0.0) {
            rigidbody.velocity.x = -v.x;
        }
        if (position.pos.y < 0.0 && v.y < 0.0) || (position.pos.y > h && v.y > 0.0) {
            rigidbody.velocity.y = -v.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_and_bounce() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..WorldTime::default()
        });
        world.insert_resource(WindowSize { w: 100, h: 100 });
        let e = world
            .spawn((MapPosition::new(99.0, 50.0), RigidBody::new(10.0, 0.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems((movement, bounce_inside_window).chain());
        schedule.run(&mut world);

        assert_eq!(world.get::<MapPosition>(e), Some(&MapPosition::new(104.0, 50.0)));
        assert_eq!(world.get::<RigidBody>(e), Some(&RigidBody::new(-10.0, 0.0)));
    }
}
