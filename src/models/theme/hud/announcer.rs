//! Kill-streak and slang announcer configuration.

use crate::models::theme::common::{Anchor, Position, default_true, style_tag};
use serde::{Deserialize, Serialize};

style_tag! {
    AnnouncerStyle {
        Default => "default",
        Outline => "outline",
    }
}

fn default_position() -> Position {
    Position::new(Anchor::Center, Anchor::Offset(220.0))
}
fn default_font_size() -> f32 {
    30.0
}
fn default_lifetime() -> f32 {
    90.0
}
fn default_fade_window() -> f32 {
    30.0
}
fn default_rise_speed() -> f32 {
    0.6
}
fn default_streak_window() -> f32 {
    120.0
}
fn default_slang_cooldown() -> f32 {
    45.0
}
fn default_stagger() -> f32 {
    12.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncerLayout {
    #[serde(default = "default_position")]
    pub position: Position,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default)]
    pub style: AnnouncerStyle,

    #[serde(default = "default_lifetime")]
    pub lifetime: f32,

    #[serde(default = "default_fade_window")]
    pub fade_window: f32,

    /// Upward drift of announcements, units per frame
    #[serde(default = "default_rise_speed")]
    pub rise_speed: f32,

    /// Max frames between kills that still extend a streak
    #[serde(default = "default_streak_window")]
    pub streak_window: f32,

    /// Min frames between two slang phrases
    #[serde(default = "default_slang_cooldown")]
    pub slang_cooldown: f32,

    /// Delay before a phrase queued behind another one starts
    #[serde(default = "default_stagger")]
    pub stagger: f32,

    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for AnnouncerLayout {
    fn default() -> Self {
        Self {
            position: default_position(),
            font_size: default_font_size(),
            style: AnnouncerStyle::default(),
            lifetime: default_lifetime(),
            fade_window: default_fade_window(),
            rise_speed: default_rise_speed(),
            streak_window: default_streak_window(),
            slang_cooldown: default_slang_cooldown(),
            stagger: default_stagger(),
            visible: true,
        }
    }
}
