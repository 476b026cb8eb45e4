//! Boss health bar configuration.

use crate::models::theme::common::{Anchor, Position, Vec2Conf, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    BossHealthStyle {
        Default => "default",
        Segmented => "segmented",
        Ascii => "ascii",
        Thin => "thin",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Center, Anchor::Offset(64.0))
}
fn default_size() -> Vec2Conf {
    Vec2Conf { x: 480.0, y: 14.0 }
}
fn default_font_size() -> f32 {
    16.0
}
fn default_segments() -> usize {
    20
}
fn default_fade_speed() -> f32 {
    0.05
}
fn default_flash_duration() -> f32 {
    12.0
}
fn default_low_health() -> f32 {
    0.25
}
fn default_catch_up() -> f32 {
    0.12
}
fn default_trail_catch_up() -> f32 {
    0.03
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossHealthLayout {
    /// Center of the bar
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_size")]
    pub size: Vec2Conf,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: BossHealthStyle,

    /// Cell count for the segmented and ascii styles
    #[serde(default = "default_segments")]
    pub segments: usize,

    /// Show/hide fade step per frame
    #[serde(default = "default_fade_speed")]
    pub fade_speed: f32,

    #[serde(default = "default_flash_duration")]
    pub flash_duration: f32,

    /// Health fraction under which the bar pulses in the warning color
    #[serde(default = "default_low_health")]
    pub low_health: f32,

    #[serde(default = "default_catch_up")]
    pub catch_up: f32,

    /// Catch-up rate of the delayed damage trail
    #[serde(default = "default_trail_catch_up")]
    pub trail_catch_up: f32,

    #[serde(default = "default_true")]
    pub show_name: bool,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for BossHealthLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            size: default_size(),
            font_size: default_font_size(),
            style: BossHealthStyle::default(),
            segments: default_segments(),
            fade_speed: default_fade_speed(),
            flash_duration: default_flash_duration(),
            low_health: default_low_health(),
            catch_up: default_catch_up(),
            trail_catch_up: default_trail_catch_up(),
            show_name: true,
            visible: true,
        }
    }
}
