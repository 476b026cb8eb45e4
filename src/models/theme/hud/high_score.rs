//! High score display configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    HighScoreStyle {
        Default => "default",
        Compact => "compact",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(-20.0), Anchor::Offset(20.0))
}
fn default_font_size() -> f32 {
    16.0
}
fn default_flash_duration() -> f32 {
    60.0
}
fn default_catch_up() -> f32 {
    0.15
}
fn default_rainbow_speed() -> f32 {
    4.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreLayout {
    /// Right edge of the text
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: HighScoreStyle,

    #[serde(default = "default_true")]
    pub show_label: bool,

    /// Flash length when the record is first beaten
    #[serde(default = "default_flash_duration")]
    pub flash_duration: f32,

    #[serde(default = "default_catch_up")]
    pub catch_up: f32,

    /// Hue degrees per frame while a new record is being set
    #[serde(default = "default_rainbow_speed")]
    pub rainbow_speed: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for HighScoreLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: HighScoreStyle::default(),
            show_label: true,
            flash_duration: default_flash_duration(),
            catch_up: default_catch_up(),
            rainbow_speed: default_rainbow_speed(),
            visible: true,
        }
    }
}
