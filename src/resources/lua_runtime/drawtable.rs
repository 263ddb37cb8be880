//! Lua table → [`Drawable`] conversion for `engine.draw`.
//!
//! ```lua
//! engine.draw({ shape = "circle", radius = 8, x = 100, y = 40,
//!               fill_color = { 255, 0, 0 }, outline_thickness = 2 })
//! engine.draw({ shape = "rect", width = 20, height = 10, origin = { 10, 5 } })
//! engine.draw({ text = "Score: 10", font = "assets/fonts/mono.ttf", size = 18 })
//! engine.draw({ sprite = "assets/textures/ship.png", scale = { 2, 2 } })
//! ```
//!
//! Colors are `{ r, g, b }` or `{ r, g, b, a }` arrays of integers (each
//! channel masked to 0..=255); vectors are `{ x, y }` arrays. Malformed
//! arrays are ignored, values of the wrong Lua type are errors.

use mlua::prelude::*;
use raylib::prelude::{Color, Vector2};

use crate::drawable::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_RECT_SIZE, DEFAULT_TEXT_SIZE, DrawStyle, Drawable,
};

/// Build a drawable from a hash-like table.
///
/// `shape` wins over `text`, which wins over `sprite`. Returns `Ok(None)`
/// for an unknown shape or a table with none of the three keys.
pub fn parse_drawable(table: &LuaTable) -> LuaResult<Option<Drawable>> {
    let mut drawable = if let Some(shape) = table.get::<Option<String>>("shape")? {
        match shape.as_str() {
            "circle" => Drawable::circle(number_or(table, "radius", DEFAULT_CIRCLE_RADIUS)?),
            "rect" => Drawable::rect(
                number_or(table, "width", DEFAULT_RECT_SIZE.0)?,
                number_or(table, "height", DEFAULT_RECT_SIZE.1)?,
            ),
            _ => return Ok(None),
        }
    } else if let Some(text) = table.get::<Option<String>>("text")? {
        Drawable::Text {
            text,
            font: table.get::<Option<String>>("font")?,
            size: number_or(table, "size", DEFAULT_TEXT_SIZE)?,
            style: DrawStyle::default(),
        }
    } else if let Some(texture) = table.get::<Option<String>>("sprite")? {
        Drawable::sprite(texture)
    } else {
        return Ok(None);
    };

    apply_style(table, drawable.style_mut())?;
    Ok(Some(drawable))
}

fn apply_style(table: &LuaTable, style: &mut DrawStyle) -> LuaResult<()> {
    if let Some(color) = read_color(table, "outline_color")? {
        style.outline_color = color;
    }
    if let Some(thickness) = table.get::<Option<f32>>("outline_thickness")? {
        style.outline_thickness = thickness;
    }
    if let Some(color) = read_color(table, "fill_color")? {
        style.fill_color = color;
    }
    if let Some(origin) = read_vector(table, "origin")? {
        style.origin = origin;
    }
    if let Some(scale) = read_vector(table, "scale")? {
        style.scale = scale;
    }
    if let Some(x) = table.get::<Option<f32>>("x")? {
        style.position.x = x;
    }
    if let Some(y) = table.get::<Option<f32>>("y")? {
        style.position.y = y;
    }
    if let Some(rotation) = table.get::<Option<f32>>("rotation")? {
        style.rotation = rotation;
    }
    Ok(())
}

fn number_or(table: &LuaTable, key: &str, default: f32) -> LuaResult<f32> {
    Ok(table.get::<Option<f32>>(key)?.unwrap_or(default))
}

fn read_color(table: &LuaTable, key: &str) -> LuaResult<Option<Color>> {
    let Some(value) = table.get::<Option<LuaTable>>(key)? else {
        return Ok(None);
    };
    let parts = value
        .sequence_values::<i64>()
        .collect::<LuaResult<Vec<i64>>>()?;
    if !(3..=4).contains(&parts.len()) {
        return Ok(None);
    }
    let channel = |i: usize| (parts[i] & 0xFF) as u8;
    let alpha = if parts.len() == 4 { channel(3) } else { 0xFF };
    Ok(Some(Color::new(channel(0), channel(1), channel(2), alpha)))
}

fn read_vector(table: &LuaTable, key: &str) -> LuaResult<Option<Vector2>> {
    let Some(value) = table.get::<Option<LuaTable>>(key)? else {
        return Ok(None);
    };
    let parts = value
        .sequence_values::<f32>()
        .collect::<LuaResult<Vec<f32>>>()?;
    if parts.len() != 2 {
        return Ok(None);
    }
    Ok(Some(Vector2 {
        x: parts[0],
        y: parts[1],
    }))
}
