//! Score display configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    /// Score rendering style
    ScoreStyle {
        Default => "default",
        Digital => "digital",
        Minimal => "minimal",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(20.0), Anchor::Offset(20.0))
}
fn default_font_size() -> f32 {
    28.0
}
fn default_digits() -> usize {
    8
}
fn default_catch_up() -> f32 {
    0.15
}
fn default_popup_lifetime() -> f32 {
    60.0
}
fn default_popup_fade() -> f32 {
    25.0
}
fn default_popup_gravity() -> f32 {
    0.08
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: ScoreStyle,

    /// Draw the "SCORE" caption above the number
    #[serde(default = "default_true")]
    pub show_label: bool,

    /// Zero-padded width used by the digital style
    #[serde(default = "default_digits")]
    pub digits: usize,

    /// Fraction of the remaining gap closed per frame
    #[serde(default = "default_catch_up")]
    pub catch_up: f32,

    #[serde(default = "default_popup_lifetime")]
    pub popup_lifetime: f32,

    #[serde(default = "default_popup_fade")]
    pub popup_fade: f32,

    #[serde(default = "default_popup_gravity")]
    pub popup_gravity: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for ScoreLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: ScoreStyle::default(),
            show_label: true,
            digits: default_digits(),
            catch_up: default_catch_up(),
            popup_lifetime: default_popup_lifetime(),
            popup_fade: default_popup_fade(),
            popup_gravity: default_popup_gravity(),
            visible: true,
        }
    }
}
