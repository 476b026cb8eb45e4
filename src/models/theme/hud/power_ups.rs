//! Active power-up slots configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    PowerUpStyle {
        Slots => "slots",
        Bars => "bars",
        Compact => "compact",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Offset(20.0), Anchor::Offset(80.0))
}
fn default_slot_size() -> f32 {
    36.0
}
fn default_spacing() -> f32 {
    44.0
}
fn default_max_slots() -> usize {
    4
}
fn default_warn_fraction() -> f32 {
    0.25
}
fn default_fade_in() -> f32 {
    0.08
}
fn default_font_size() -> f32 {
    12.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_slot_size")]
    pub slot_size: f32,

    /// Vertical distance between slots
    #[serde(default = "default_spacing")]
    pub spacing: f32,

    #[serde(default)]
    pub style: PowerUpStyle,

    #[serde(default = "default_max_slots")]
    pub max_slots: usize,

    /// Remaining fraction under which a slot starts blinking
    #[serde(default = "default_warn_fraction")]
    pub warn_fraction: f32,

    /// Appear progress gained per frame by a new slot
    #[serde(default = "default_fade_in")]
    pub fade_in: f32,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for PowerUpLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            slot_size: default_slot_size(),
            spacing: default_spacing(),
            style: PowerUpStyle::default(),
            max_slots: default_max_slots(),
            warn_fraction: default_warn_fraction(),
            fade_in: default_fade_in(),
            font_size: default_font_size(),
            visible: true,
        }
    }
}
