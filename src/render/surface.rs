//! Immediate-mode 2D drawing interface.
//!
//! The HUD only ever writes to a surface: it never reads pixels back. Transforms, alpha,
//! fill/stroke and glow behave like a canvas context, including `save`/`restore` of all
//! of that state.

use crate::models::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font used for a text call.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            size,
        }
    }
}

pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn rotate(&mut self, radians: f32);

    /// Global opacity for the following calls, multiplied into each color's alpha.
    fn set_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color, width: f32);
    /// Soft shadow behind shapes and text, a zero blur disables it.
    fn set_glow(&mut self, color: Color, blur: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32);
    fn fill_polygon(&mut self, points: &[(f32, f32)]);
    fn stroke_polygon(&mut self, points: &[(f32, f32)]);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &FontSpec, align: TextAlign);
}
