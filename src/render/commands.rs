//! Recording surface.
//!
//! `CommandList` stores every call as a `DrawCommand`, ready to be replayed by a GPU
//! backend or inspected in tests.

use crate::models::theme::Color;
use crate::render::surface::{FontSpec, Surface, TextAlign};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Scale { sx: f32, sy: f32 },
    Rotate { radians: f32 },
    Alpha(f32),
    Fill(Color),
    Stroke { color: Color, width: f32 },
    Glow { color: Color, blur: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    StrokeRect { x: f32, y: f32, width: f32, height: f32 },
    FillCircle { cx: f32, cy: f32, radius: f32 },
    StrokeCircle { cx: f32, cy: f32, radius: f32 },
    FillPolygon(Vec<(f32, f32)>),
    StrokePolygon(Vec<(f32, f32)>),
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: FontSpec,
        align: TextAlign,
    },
}

impl DrawCommand {
    /// Whether the command puts something on screen.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillRect { .. }
                | DrawCommand::StrokeRect { .. }
                | DrawCommand::FillCircle { .. }
                | DrawCommand::StrokeCircle { .. }
                | DrawCommand::FillPolygon(_)
                | DrawCommand::StrokePolygon(_)
                | DrawCommand::Line { .. }
                | DrawCommand::Text { .. }
        )
    }
}

#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every text command, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn shape_count(&self) -> usize {
        self.commands.iter().filter(|cmd| cmd.is_shape()).count()
    }

    /// Every fill, stroke and glow color set, in order.
    pub fn colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill(color) => Some(*color),
                DrawCommand::Stroke { color, .. } => Some(*color),
                DrawCommand::Glow { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Font families used by text commands.
    pub fn font_families(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { font, .. } => Some(font.family.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandList {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        self.commands.push(DrawCommand::Glow { color, blur });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius });
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.commands.push(DrawCommand::StrokeCircle { cx, cy, radius });
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)]) {
        self.commands.push(DrawCommand::FillPolygon(points.to_vec()));
    }

    fn stroke_polygon(&mut self, points: &[(f32, f32)]) {
        self.commands
            .push(DrawCommand::StrokePolygon(points.to_vec()));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &FontSpec, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.clone(),
            align,
        });
    }
}
