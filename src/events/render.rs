//! Deferred draw commands.
//!
//! Logic systems (and Lua through `engine.draw`) write
//! [`RenderDrawableEvent`]s during the frame. Nothing is painted until
//! [`flush_draw_commands`](crate::systems::render::flush_draw_commands) runs,
//! which drains the whole queue to the render surface in the order the
//! commands were written and leaves it empty.

use bevy_ecs::message::Message;

use crate::drawable::Drawable;

/// One owned drawable waiting for the frame's flush.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct RenderDrawableEvent {
    pub drawable: Drawable,
}

impl From<Drawable> for RenderDrawableEvent {
    fn from(drawable: Drawable) -> Self {
        Self { drawable }
    }
}
