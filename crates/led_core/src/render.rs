//! Render-layer interface
//!
//! The core never talks to a graphics API. Levels and layers describe
//! themselves through the [`Painter`] trait in world coordinates; the host
//! application implements it on top of whatever it draws with. Fonts and
//! label layout are passed in through [`RenderStyle`] instead of living in
//! global state.

use crate::tileset::{TileRegion, Tileset};
use crate::{Point, RectI};
use glam::Vec2;

/// Linear RGBA color, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const LIGHT_GRAY: Color = Color::rgba(0.75, 0.75, 0.75, 1.0);
    pub const TEAL: Color = Color::rgba(0.0, 0.5, 0.5, 1.0);
    pub const SKY: Color = Color::rgba(0.53, 0.81, 0.92, 1.0);
    pub const ORANGE: Color = Color::rgba(1.0, 0.65, 0.0, 1.0);
    pub const LIME: Color = Color::rgba(0.2, 0.8, 0.2, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From a packed `0xRRGGBBAA` value
    pub const fn hex(rgba: u32) -> Self {
        Self {
            r: ((rgba >> 24) & 0xff) as f32 / 255.0,
            g: ((rgba >> 16) & 0xff) as f32 / 255.0,
            b: ((rgba >> 8) & 0xff) as f32 / 255.0,
            a: (rgba & 0xff) as f32 / 255.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Drawing surface in world coordinates (y up)
pub trait Painter {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Text centered horizontally on `pos`, rotated counter-clockwise by `angle` radians
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, angle: f32);
    /// Draw a tileset sub-image stretched over the given world rect
    fn tile_image(
        &mut self,
        tileset: &Tileset,
        region: TileRegion,
        min: Vec2,
        size: Vec2,
        tint: Color,
    );
    /// Restrict subsequent drawing to `bounds` until the matching [`Painter::pop_clip`]
    fn push_clip(&mut self, bounds: RectI);
    fn pop_clip(&mut self);
}

/// Injected text and label settings
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub font_size: f32,
    pub text_color: Color,
    /// Distance in screen pixels between a level edge and its size label
    pub label_offset: f32,
    /// Current camera zoom, used to keep labels a constant apparent size
    pub zoom: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            text_color: Color::WHITE,
            label_offset: 30.0,
            zoom: 1.0,
        }
    }
}

/// One cell of a tile layer, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub grid: Point,
    /// World-space rect covered by the cell
    pub rect: RectI,
    /// `None` for empty cells and for cells whose sub-image is unavailable
    pub region: Option<TileRegion>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDraw {
    pub bounds: RectI,
    pub origin: Vec2,
}

/// What a layer yields to the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum LayerDrawList {
    Tiles {
        visible: bool,
        clip: RectI,
        cells: Vec<TileDraw>,
    },
    Entities(Vec<EntityDraw>),
}

pub(crate) fn rect_min(rect: RectI) -> Vec2 {
    Vec2::new(rect.x as f32, rect.y as f32)
}

pub(crate) fn rect_size(rect: RectI) -> Vec2 {
    Vec2::new(rect.w as f32, rect.h as f32)
}

/// Painter that records calls, for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPainter {
    pub commands: Vec<DrawCommand>,
    pub clip_depth: i32,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCommand {
    FillRect(Vec2, Vec2),
    StrokeRect(Vec2, Vec2),
    Circle(Vec2, f32),
    Line(Vec2, Vec2),
    Text(String, f32),
    Image(u32, Vec2),
    PushClip(RectI),
    PopClip,
}

#[cfg(test)]
impl Painter for RecordingPainter {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, _color: Color) {
        self.commands.push(DrawCommand::FillRect(min, size));
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, _width: f32, _color: Color) {
        self.commands.push(DrawCommand::StrokeRect(min, size));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.commands.push(DrawCommand::Circle(center, radius));
    }

    fn line(&mut self, from: Vec2, to: Vec2, _width: f32, _color: Color) {
        self.commands.push(DrawCommand::Line(from, to));
    }

    fn text(&mut self, _pos: Vec2, text: &str, _size: f32, _color: Color, angle: f32) {
        self.commands.push(DrawCommand::Text(text.to_string(), angle));
    }

    fn tile_image(
        &mut self,
        _tileset: &Tileset,
        region: TileRegion,
        min: Vec2,
        _size: Vec2,
        _tint: Color,
    ) {
        self.commands.push(DrawCommand::Image(region.index, min));
    }

    fn push_clip(&mut self, bounds: RectI) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(bounds));
    }

    fn pop_clip(&mut self) {
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let gold = Color::hex(0xffd700ff);
        assert_eq!(gold.r, 1.0);
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(gold.b, 0.0);
        assert_eq!(gold.a, 1.0);
        assert_eq!(gold.with_alpha(0.5).a, 0.5);
    }
}
