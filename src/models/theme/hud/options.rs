//! Options overlay panel configuration.

use crate::models::theme::common::Vec2Conf;
use serde::{Deserialize, Serialize};

fn default_size() -> Vec2Conf {
    Vec2Conf { x: 440.0, y: 380.0 }
}
fn default_font_size() -> f32 {
    20.0
}
fn default_title_size() -> f32 {
    30.0
}
fn default_row_height() -> f32 {
    40.0
}
fn default_dim_alpha() -> f32 {
    0.6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsLayout {
    /// Panel size, always centered on screen
    #[serde(default = "default_size")]
    pub size: Vec2Conf,

    #[serde(default = "default_font_size")]
    pub font_size: f32,

    #[serde(default = "default_title_size")]
    pub title_size: f32,

    #[serde(default = "default_row_height")]
    pub row_height: f32,

    /// Opacity of the full-screen dimming layer when fully open
    #[serde(default = "default_dim_alpha")]
    pub dim_alpha: f32,
}

impl Default for OptionsLayout {
    fn default() -> Self {
        Self {
            size: default_size(),
            font_size: default_font_size(),
            title_size: default_title_size(),
            row_height: default_row_height(),
            dim_alpha: default_dim_alpha(),
        }
    }
}
