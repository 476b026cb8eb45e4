//! Wave indicator configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    WaveStyle {
        Default => "default",
        Banner => "banner",
        Ascii => "ascii",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Center, Anchor::Offset(24.0))
}
fn default_font_size() -> f32 {
    22.0
}
fn default_flash_duration() -> f32 {
    60.0
}
fn default_banner_delay() -> f32 {
    20.0
}
fn default_banner_duration() -> f32 {
    120.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: WaveStyle,

    #[serde(default = "default_flash_duration")]
    pub flash_duration: f32,

    /// Frames between a wave change and the big "WAVE N" banner
    #[serde(default = "default_banner_delay")]
    pub banner_delay: f32,

    #[serde(default = "default_banner_duration")]
    pub banner_duration: f32,

    #[serde(default = "default_true")]
    pub show_banner: bool,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for WaveLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: WaveStyle::default(),
            flash_duration: default_flash_duration(),
            banner_delay: default_banner_delay(),
            banner_duration: default_banner_duration(),
            show_banner: true,
            visible: true,
        }
    }
}
