//! Bomb stock configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    BombsStyle {
        Icons => "icons",
        Bar => "bar",
        Text => "text",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(-20.0), Anchor::Offset(-40.0))
}
fn default_icon_size() -> f32 {
    16.0
}
fn default_spacing() -> f32 {
    22.0
}
fn default_max_display() -> usize {
    5
}
fn default_flash_duration() -> f32 {
    20.0
}
fn default_font_size() -> f32 {
    14.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BombsLayout {
    /// Right edge of the row
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_icon_size")]
    pub icon_size: f32,

    #[serde(default = "default_spacing")]
    pub spacing: f32,

    #[serde(default)]
    pub style: BombsStyle,

    #[serde(default = "default_max_display")]
    pub max_display: usize,

    #[serde(default = "default_flash_duration")]
    pub flash_duration: f32,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for BombsLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            icon_size: default_icon_size(),
            spacing: default_spacing(),
            style: BombsStyle::default(),
            max_display: default_max_display(),
            flash_duration: default_flash_duration(),
            font_size: default_font_size(),
            visible: true,
        }
    }
}
