//! Deferred rendering.
//!
//! Draw commands are queued as [`RenderDrawableEvent`]s during the frame and
//! painted here, in one place, once per frame. Painting goes through the
//! [`RenderSurface`] trait so the queue can be flushed into something other
//! than a raylib window (tests record the drawables instead).
//!
//! [`flush_draw_commands`] is the exclusive system used by the binary. It
//! makes sure every font and texture the queued drawables reference is in
//! the [`FontCache`] / [`TextureCache`] before drawing starts, then opens a
//! raylib drawing scope, clears it and paints the queue in write order.
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::*;

use crate::drawable::{DrawShape, DrawStyle, Drawable};
use crate::events::render::RenderDrawableEvent;
use crate::resources::assetcache::{FontCache, TextureCache};

/// Background used when clearing the window before a flush.
pub const CLEAR_COLOR: Color = Color::BLACK;

/// Character spacing for text drawn with a loaded font.
const TEXT_SPACING: f32 = 1.0;
const RING_SEGMENTS: i32 = 36;

/// Something drawables can be painted onto.
pub trait RenderSurface {
    fn draw(&mut self, drawable: &Drawable);
}

/// Take every queued drawable, oldest first, leaving the queue empty.
pub fn take_drawables(queue: &mut Messages<RenderDrawableEvent>) -> Vec<Drawable> {
    queue.drain().map(|event| event.drawable).collect()
}

/// Paint `drawables` in order. Returns how many were painted.
pub fn paint(drawables: &[Drawable], surface: &mut impl RenderSurface) -> usize {
    for drawable in drawables {
        surface.draw(drawable);
    }
    drawables.len()
}

/// Drain `queue` onto `surface` in write order.
pub fn flush_drawables(
    queue: &mut Messages<RenderDrawableEvent>,
    surface: &mut impl RenderSurface,
) -> usize {
    let drawables = take_drawables(queue);
    paint(&drawables, surface)
}

/// Load every font and texture `drawables` reference that is not cached yet.
///
/// Keys that fail to load stay uncached and are retried on the next flush.
pub fn preload_assets(
    drawables: &[Drawable],
    fonts: &mut FontCache,
    textures: &mut TextureCache,
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
) {
    for drawable in drawables {
        match drawable {
            Drawable::Text {
                font: Some(key), ..
            } => {
                fonts.get_with(key, |path| rl.load_font(thread, path).ok());
            }
            Drawable::Sprite { texture, .. } => {
                textures.get_with(texture, |path| rl.load_texture(thread, path).ok());
            }
            _ => {}
        }
    }
}

/// Raylib-backed [`RenderSurface`].
///
/// Fonts and textures are looked up without loading; anything missing from
/// the caches falls back to the default font or is skipped.
pub struct RaylibSurface<'a, 'd> {
    d: &'a mut RaylibDrawHandle<'d>,
    fonts: &'a FontCache,
    textures: &'a TextureCache,
}

impl<'a, 'd> RaylibSurface<'a, 'd> {
    pub fn new(
        d: &'a mut RaylibDrawHandle<'d>,
        fonts: &'a FontCache,
        textures: &'a TextureCache,
    ) -> Self {
        Self { d, fonts, textures }
    }

    fn draw_shape(&mut self, shape: &DrawShape, style: &DrawStyle) {
        match *shape {
            DrawShape::Circle { radius } => {
                let top_left = style.top_left();
                let r = radius * style.scale.x;
                let center = Vector2 {
                    x: top_left.x + r,
                    y: top_left.y + radius * style.scale.y,
                };
                self.d.draw_circle_v(center, r, style.fill_color);
                if style.outline_thickness > 0.0 {
                    self.d.draw_ring(
                        center,
                        r,
                        r + style.outline_thickness,
                        0.0,
                        360.0,
                        RING_SEGMENTS,
                        style.outline_color,
                    );
                }
            }
            DrawShape::Rect { width, height } => {
                let rec = Rectangle {
                    x: style.position.x,
                    y: style.position.y,
                    width: width * style.scale.x,
                    height: height * style.scale.y,
                };
                let origin = Vector2 {
                    x: style.origin.x * style.scale.x,
                    y: style.origin.y * style.scale.y,
                };
                self.d
                    .draw_rectangle_pro(rec, origin, style.rotation, style.fill_color);
                // Outline ignores rotation.
                if style.outline_thickness > 0.0 {
                    let top_left = style.top_left();
                    let t = style.outline_thickness;
                    let outline = Rectangle {
                        x: top_left.x - t,
                        y: top_left.y - t,
                        width: rec.width + 2.0 * t,
                        height: rec.height + 2.0 * t,
                    };
                    self.d
                        .draw_rectangle_lines_ex(outline, t, style.outline_color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, font: Option<&str>, size: f32, style: &DrawStyle) {
        let size = size * style.scale.y;
        match font.and_then(|key| self.fonts.peek(key)) {
            Some(font) => {
                let origin = Vector2 {
                    x: style.origin.x * style.scale.x,
                    y: style.origin.y * style.scale.y,
                };
                self.d.draw_text_pro(
                    font,
                    text,
                    style.position,
                    origin,
                    style.rotation,
                    size,
                    TEXT_SPACING,
                    style.fill_color,
                );
            }
            None => {
                let top_left = style.top_left();
                self.d.draw_text(
                    text,
                    top_left.x as i32,
                    top_left.y as i32,
                    size as i32,
                    style.fill_color,
                );
            }
        }
    }

    fn draw_sprite(&mut self, key: &str, style: &DrawStyle) {
        let Some(texture) = self.textures.peek(key) else {
            debug!("Skipping sprite '{}': texture not loaded", key);
            return;
        };
        let width = texture.width as f32;
        let height = texture.height as f32;
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width,
            height,
        };
        let dest = Rectangle {
            x: style.position.x,
            y: style.position.y,
            width: width * style.scale.x,
            height: height * style.scale.y,
        };
        let origin = Vector2 {
            x: style.origin.x * style.scale.x,
            y: style.origin.y * style.scale.y,
        };
        self.d
            .draw_texture_pro(texture, src, dest, origin, style.rotation, style.fill_color);
    }
}

impl RenderSurface for RaylibSurface<'_, '_> {
    fn draw(&mut self, drawable: &Drawable) {
        match drawable {
            Drawable::Shape { shape, style } => self.draw_shape(shape, style),
            Drawable::Text {
                text,
                font,
                size,
                style,
            } => self.draw_text(text, font.as_deref(), *size, style),
            Drawable::Sprite { texture, style } => self.draw_sprite(texture, style),
        }
    }
}

/// Exclusive system: paint the frame's queued drawables to the window.
///
/// Requires the `RaylibHandle` and `RaylibThread` non-send resources. The
/// font and texture caches are created on first use.
pub fn flush_draw_commands(world: &mut World) {
    let drawables = match world.get_resource_mut::<Messages<RenderDrawableEvent>>() {
        Some(mut queue) => take_drawables(&mut queue),
        None => Vec::new(),
    };

    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let mut fonts = world
        .remove_non_send_resource::<FontCache>()
        .unwrap_or_default();
    let mut textures = world
        .remove_non_send_resource::<TextureCache>()
        .unwrap_or_default();

    preload_assets(&drawables, &mut fonts, &mut textures, &mut rl, &thread);

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(CLEAR_COLOR);
        let mut surface = RaylibSurface::new(&mut d, &fonts, &textures);
        paint(&drawables, &mut surface);
    }

    world.insert_non_send_resource(textures);
    world.insert_non_send_resource(fonts);
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}
