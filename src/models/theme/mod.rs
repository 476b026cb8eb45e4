//! Theme descriptors.
//!
//! A theme is a self-contained, immutable description of how the whole HUD looks:
//! colors, font families, one layout block per widget and a few global effect flags.
//! Every field carries a serde default, so a theme file only has to name what it changes
//! and any theme that parses can be drawn by every widget.

pub mod common;
pub mod hud;
pub mod registry;

pub use common::{Anchor, Color, Position, Vec2Conf, colors, load_toml, parse_toml};
pub use hud::HudLayout;
pub use registry::{ThemeRegistry, ThemeSummary};

use common::{default_true, style_tag};
use serde::{Deserialize, Serialize};

fn default_primary() -> Color {
    [0.0, 1.0, 1.0, 1.0]
}
fn default_secondary() -> Color {
    [1.0, 0.0, 1.0, 1.0]
}
fn default_accent() -> Color {
    [1.0, 1.0, 0.0, 1.0]
}
fn default_warning() -> Color {
    [1.0, 0.2, 0.2, 1.0]
}
fn default_success() -> Color {
    [0.2, 1.0, 0.4, 1.0]
}
fn default_text() -> Color {
    [1.0, 1.0, 1.0, 1.0]
}
fn default_panel_background() -> Color {
    [0.0, 0.0, 0.0, 0.6]
}
fn default_panel_border() -> Color {
    [0.0, 1.0, 1.0, 0.8]
}
fn default_glow() -> Color {
    [0.0, 1.0, 1.0, 1.0]
}

/// Named colors of a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default = "default_primary")]
    pub primary: Color,
    #[serde(default = "default_secondary")]
    pub secondary: Color,
    #[serde(default = "default_accent")]
    pub accent: Color,
    #[serde(default = "default_warning")]
    pub warning: Color,
    #[serde(default = "default_success")]
    pub success: Color,
    #[serde(default = "default_text")]
    pub text: Color,

    // One color per HUD field
    #[serde(default = "default_text")]
    pub score: Color,
    #[serde(default = "default_warning")]
    pub lives: Color,
    #[serde(default = "default_primary")]
    pub wave: Color,
    #[serde(default = "default_accent")]
    pub bombs: Color,
    #[serde(default = "default_secondary")]
    pub combo: Color,

    #[serde(default = "default_panel_background")]
    pub panel_background: Color,
    #[serde(default = "default_panel_border")]
    pub panel_border: Color,
    #[serde(default = "default_glow")]
    pub glow: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
            warning: default_warning(),
            success: default_success(),
            text: default_text(),
            score: default_text(),
            lives: default_warning(),
            wave: default_primary(),
            bombs: default_accent(),
            combo: default_secondary(),
            panel_background: default_panel_background(),
            panel_border: default_panel_border(),
            glow: default_glow(),
        }
    }
}

impl ThemeColors {
    /// Every color of the theme, used to check what a draw pass may read.
    pub fn all(&self) -> [Color; 14] {
        [
            self.primary,
            self.secondary,
            self.accent,
            self.warning,
            self.success,
            self.text,
            self.score,
            self.lives,
            self.wave,
            self.bombs,
            self.combo,
            self.panel_background,
            self.panel_border,
            self.glow,
        ]
    }
}

fn default_font() -> String {
    "monospace".to_string()
}

/// Font families of a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    #[serde(default = "default_font")]
    pub primary: String,
    #[serde(default = "default_font")]
    pub score: String,
    #[serde(default = "default_font")]
    pub title: String,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            primary: default_font(),
            score: default_font(),
            title: default_font(),
        }
    }
}

style_tag! {
    /// Outline of the panels drawn behind grouped widgets
    PanelStyle {
        Rounded => "rounded",
        Sharp => "sharp",
        Bracket => "bracket",
        None => "none",
    }
}

fn default_glow_intensity() -> f32 {
    12.0
}

/// Global visual effects honored by the widgets that support them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEffects {
    #[serde(default = "default_true")]
    pub glow: bool,

    /// Blur radius of the glow
    #[serde(default = "default_glow_intensity")]
    pub glow_intensity: f32,

    #[serde(default)]
    pub scanlines: bool,

    #[serde(default)]
    pub flicker: bool,

    #[serde(default)]
    pub panel_style: PanelStyle,
}

impl Default for ThemeEffects {
    fn default() -> Self {
        Self {
            glow: true,
            glow_intensity: default_glow_intensity(),
            scanlines: false,
            flicker: false,
            panel_style: PanelStyle::default(),
        }
    }
}

/// A complete HUD theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub colors: ThemeColors,

    #[serde(default)]
    pub fonts: ThemeFonts,

    #[serde(default)]
    pub layout: HudLayout,

    #[serde(default)]
    pub effects: ThemeEffects,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            description: String::new(),
            colors: ThemeColors::default(),
            fonts: ThemeFonts::default(),
            layout: HudLayout::default(),
            effects: ThemeEffects::default(),
        }
    }
}

impl Theme {
    /// Glow blur for this theme, zero when glow is disabled.
    pub fn glow_blur(&self) -> f32 {
        if self.effects.glow {
            self.effects.glow_intensity
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> ThemeSummary {
        ThemeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::hud::{BossHealthStyle, LivesStyle};

    #[test]
    fn test_partial_theme_gets_defaults() {
        let theme: Theme = parse_toml(
            r#"
            id = "partial"
            name = "Partial"

            [colors]
            lives = [0.5, 0.5, 0.5, 1.0]

            [layout.lives]
            style = "hearts"
            "#,
        )
        .unwrap();

        assert_eq!(theme.colors.lives, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(theme.colors.score, ThemeColors::default().score);
        assert_eq!(theme.layout.lives.style, LivesStyle::Hearts);
        assert_eq!(theme.layout.lives.max_display, 5);
        assert_eq!(theme.fonts, ThemeFonts::default());
    }

    #[test]
    fn test_widgets_visible_unless_hidden() {
        let theme: Theme = parse_toml(
            r#"
            id = "sparse"
            name = "Sparse"

            [layout.score]
            font_size = 20.0

            [layout.wave]
            visible = false
            "#,
        )
        .unwrap();

        let layout = &theme.layout;
        assert!(layout.score.visible);
        assert!(!layout.wave.visible);
        for visible in [
            layout.lives.visible,
            layout.bombs.visible,
            layout.combo.visible,
            layout.boss_health.visible,
            layout.power_ups.visible,
            layout.high_score.visible,
            layout.multiplier.visible,
            layout.announcer.visible,
        ] {
            assert!(visible);
        }
    }

    #[test]
    fn test_unknown_style_tag_falls_back() {
        let theme: Theme = parse_toml(
            r#"
            id = "odd"
            name = "Odd"

            [layout.boss_health]
            style = "sparkly"

            [effects]
            panel_style = "hexagon"
            "#,
        )
        .unwrap();

        assert_eq!(theme.layout.boss_health.style, BossHealthStyle::Default);
        assert_eq!(theme.effects.panel_style, PanelStyle::Rounded);
    }

    #[test]
    fn test_style_tag_serializes_as_string() {
        let theme = Theme::default();
        let text = toml::to_string_pretty(&theme).unwrap();
        assert!(text.contains("style = \"ships\""));
        let back: Theme = parse_toml(&text).unwrap();
        assert_eq!(back.layout.lives.style, LivesStyle::Ships);
    }
}
