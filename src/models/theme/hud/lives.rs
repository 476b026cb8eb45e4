//! Lives counter configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    LivesStyle {
        Ships => "ships",
        Hearts => "hearts",
        Dots => "dots",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(20.0), Anchor::Offset(-40.0))
}
fn default_icon_size() -> f32 {
    18.0
}
fn default_spacing() -> f32 {
    26.0
}
fn default_max_display() -> usize {
    5
}
fn default_flash_duration() -> f32 {
    30.0
}
fn default_font_size() -> f32 {
    14.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivesLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_icon_size")]
    pub icon_size: f32,

    /// Horizontal distance between icon centers
    #[serde(default = "default_spacing")]
    pub spacing: f32,

    #[serde(default)]
    pub style: LivesStyle,

    /// Icons past this count are not drawn
    #[serde(default = "default_max_display")]
    pub max_display: usize,

    /// Frames the row flashes after losing a life
    #[serde(default = "default_flash_duration")]
    pub flash_duration: f32,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_true")]
    pub show_label: bool,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for LivesLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            icon_size: default_icon_size(),
            spacing: default_spacing(),
            style: LivesStyle::default(),
            max_display: default_max_display(),
            flash_duration: default_flash_duration(),
            font_size: default_font_size(),
            show_label: true,
            visible: true,
        }
    }
}
