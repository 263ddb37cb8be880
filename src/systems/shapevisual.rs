use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::shapevisual::ShapeVisual;
use crate::events::render::RenderDrawableEvent;

/// Queue every positioned [`ShapeVisual`] for this frame's flush.
pub fn queue_shape_draws(
    query: Query<(&MapPosition, &ShapeVisual)>,
    mut writer: MessageWriter<RenderDrawableEvent>,
) {
    for (position, visual) in query.iter() {
        let mut drawable = visual.drawable.clone();
        drawable.style_mut().position = position.pos;
        writer.write(RenderDrawableEvent { drawable });
    }
}
