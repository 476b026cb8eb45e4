//! Combo meter configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    ComboStyle {
        Default => "default",
        Line => "line",
        Ascii => "ascii",
        Holographic => "holographic",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(-20.0), Anchor::Offset(90.0))
}
fn default_font_size() -> f32 {
    36.0
}
fn default_timer_max() -> f32 {
    120.0
}
fn default_min_combo() -> u32 {
    2
}
fn default_pulse_scale() -> f32 {
    1.4
}
fn default_fade_speed() -> f32 {
    0.08
}
fn default_bar_width() -> f32 {
    140.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboLayout {
    /// Right edge of the meter
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: ComboStyle,

    /// Draw the combo timer as a draining bar
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Draw the tier multiplier next to the count
    #[serde(default = "default_true")]
    pub show_multiplier: bool,

    /// combo_timer value that maps to a full bar
    #[serde(default = "default_timer_max")]
    pub timer_max: f32,

    /// The meter stays hidden below this combo
    #[serde(default = "default_min_combo")]
    pub min_combo: u32,

    #[serde(default = "default_pulse_scale")]
    pub pulse_scale: f32,

    #[serde(default = "default_fade_speed")]
    pub fade_speed: f32,

    #[serde(default = "default_bar_width")]
    pub bar_width: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for ComboLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: ComboStyle::default(),
            show_progress: true,
            show_multiplier: true,
            timer_max: default_timer_max(),
            min_combo: default_min_combo(),
            pulse_scale: default_pulse_scale(),
            fade_speed: default_fade_speed(),
            bar_width: default_bar_width(),
            visible: true,
        }
    }
}
