//! Multiplier popup configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    MultiplierStyle {
        Default => "default",
        Burst => "burst",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Center, Anchor::Offset(160.0))
}
fn default_font_size() -> f32 {
    48.0
}
fn default_lifetime() -> f32 {
    60.0
}
fn default_fade_window() -> f32 {
    20.0
}
fn default_pulse_scale() -> f32 {
    1.8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiplierLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: MultiplierStyle,

    #[serde(default = "default_lifetime")]
    pub lifetime: f32,

    #[serde(default = "default_fade_window")]
    pub fade_window: f32,

    /// Initial scale, eases back to 1
    #[serde(default = "default_pulse_scale")]
    pub pulse_scale: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for MultiplierLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: MultiplierStyle::default(),
            lifetime: default_lifetime(),
            fade_window: default_fade_window(),
            pulse_scale: default_pulse_scale(),
            visible: true,
        }
    }
}
