//! Owned drawables for the deferred render queue.
//!
//! A [`Drawable`] is plain data: what to paint and how to style it. Font and
//! texture references are cache keys (file paths) resolved by the render
//! surface at flush time, so a drawable can be built anywhere in the frame
//! without touching raylib.

use raylib::prelude::{Color, Vector2};

/// Transform and paint settings shared by every drawable kind.
///
/// Defaults: white fill and outline, no outline, unit scale, origin and
/// position at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_thickness: f32,
    /// Local pivot; position, rotation and scale apply around it.
    pub origin: Vector2,
    pub scale: Vector2,
    pub position: Vector2,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            outline_color: Color::WHITE,
            outline_thickness: 0.0,
            origin: Vector2 { x: 0.0, y: 0.0 },
            scale: Vector2 { x: 1.0, y: 1.0 },
            position: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
        }
    }
}

impl DrawStyle {
    /// Top-left corner of a `width` x `height` box after applying origin and scale.
    pub fn top_left(&self) -> Vector2 {
        Vector2 {
            x: self.position.x - self.origin.x * self.scale.x,
            y: self.position.y - self.origin.y * self.scale.y,
        }
    }
}

/// Geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawShape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
}

/// Something the render surface can paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Shape {
        shape: DrawShape,
        style: DrawStyle,
    },
    Text {
        text: String,
        /// Font cache key; `None` uses the surface's default font.
        font: Option<String>,
        size: f32,
        style: DrawStyle,
    },
    Sprite {
        /// Texture cache key.
        texture: String,
        style: DrawStyle,
    },
}

/// Character size used when a text drawable does not set one.
pub const DEFAULT_TEXT_SIZE: f32 = 30.0;
/// Circle radius used when a circle drawable does not set one.
pub const DEFAULT_CIRCLE_RADIUS: f32 = 5.0;
/// Rectangle size used when a rect drawable does not set one.
pub const DEFAULT_RECT_SIZE: (f32, f32) = (10.0, 5.0);

impl Drawable {
    pub fn circle(radius: f32) -> Self {
        Drawable::Shape {
            shape: DrawShape::Circle { radius },
            style: DrawStyle::default(),
        }
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Drawable::Shape {
            shape: DrawShape::Rect { width, height },
            style: DrawStyle::default(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Drawable::Text {
            text: text.into(),
            font: None,
            size: DEFAULT_TEXT_SIZE,
            style: DrawStyle::default(),
        }
    }

    pub fn sprite(texture: impl Into<String>) -> Self {
        Drawable::Sprite {
            texture: texture.into(),
            style: DrawStyle::default(),
        }
    }

    pub fn style(&self) -> &DrawStyle {
        match self {
            Drawable::Shape { style, .. }
            | Drawable::Text { style, .. }
            | Drawable::Sprite { style, .. } => style,
        }
    }

    pub fn style_mut(&mut self) -> &mut DrawStyle {
        match self {
            Drawable::Shape { style, .. }
            | Drawable::Text { style, .. }
            | Drawable::Sprite { style, .. } => style,
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.style_mut().position = Vector2 { x, y };
        self
    }

    /// Builder-style fill color setter.
    pub fn filled(mut self, color: Color) -> Self {
        self.style_mut().fill_color = color;
        self
    }

    /// Builder-style rotation setter, in degrees.
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.style_mut().rotation = degrees;
        self
    }
}
