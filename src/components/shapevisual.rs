//! Drawable attached to an entity.
//!
//! [`queue_shape_draws`](crate::systems::shapevisual::queue_shape_draws)
//! copies the drawable every frame, moves it to the entity's
//! [`MapPosition`](super::mapposition::MapPosition) and queues it for the
//! frame's flush.

use bevy_ecs::prelude::Component;

use crate::drawable::Drawable;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct ShapeVisual {
    pub drawable: Drawable,
}

impl ShapeVisual {
    pub fn new(drawable: Drawable) -> Self {
        Self { drawable }
    }
}
