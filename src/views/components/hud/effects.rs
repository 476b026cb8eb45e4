//! Full-screen CRT overlay: scanlines and a faint brightness flicker.

use super::HudWidget;
use crate::models::theme::{Theme, colors};
use crate::render::surface::Surface;
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::flicker;
use std::sync::Arc;

const SCANLINE_SPACING: f32 = 3.0;
const SCANLINE_ALPHA: f32 = 0.18;
const FLICKER_FREQUENCY: f32 = 0.9;
const FLICKER_STRENGTH: f32 = 0.04;

pub struct ScreenEffects {
    theme: Arc<Theme>,
    screen: (f32, f32),
    enabled: bool,
    time: f32,
}

impl ScreenEffects {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            enabled: true,
            time: 0.0,
        }
    }

    /// Player switch, on top of whatever the theme asks for.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether anything would be drawn with the current theme.
    pub fn is_active(&self) -> bool {
        self.enabled && (self.theme.effects.scanlines || self.theme.effects.flicker)
    }
}

impl HudWidget for ScreenEffects {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
    }

    fn update(&mut self, _snapshot: &GameSnapshot, dt: f32) {
        self.time += dt;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_active() {
            return;
        }
        let (width, height) = self.screen;
        let effects = &self.theme.effects;

        surface.save();
        if effects.scanlines {
            surface.set_fill(colors::with_alpha(colors::BLACK, SCANLINE_ALPHA));
            let mut y = 0.0;
            while y < height {
                surface.fill_rect(0.0, y, width, 1.0);
                y += SCANLINE_SPACING;
            }
        }
        if effects.flicker {
            let alpha = flicker(self.time, FLICKER_FREQUENCY) * FLICKER_STRENGTH;
            surface.set_fill(colors::with_alpha(self.theme.colors.text, alpha));
            surface.fill_rect(0.0, 0.0, width, height);
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.time = 0.0;
    }

    fn position(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::ThemeRegistry;
    use crate::render::commands::CommandList;

    #[test]
    fn test_scanlines_cover_the_screen() {
        let mut effects = ScreenEffects::new(ThemeRegistry::builtin().get("retro"));
        effects.resize(300.0, 90.0);
        let mut list = CommandList::new();
        effects.draw(&mut list);
        // 30 scanlines plus the flicker wash.
        assert_eq!(list.shape_count(), 31);
    }

    #[test]
    fn test_disabled_or_plain_theme_draws_nothing() {
        let registry = ThemeRegistry::builtin();
        let mut effects = ScreenEffects::new(registry.get("retro"));
        effects.resize(300.0, 90.0);
        effects.set_enabled(false);
        let mut list = CommandList::new();
        effects.draw(&mut list);
        assert!(list.is_empty());

        effects.set_enabled(true);
        effects.set_theme(registry.get("minimal"));
        let mut list = CommandList::new();
        effects.draw(&mut list);
        assert!(list.is_empty());
    }
}
