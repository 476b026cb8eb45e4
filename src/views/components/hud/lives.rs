//! Remaining lives as a row of icons.

use super::HudWidget;
use crate::models::theme::hud::LivesStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{FlashTimer, Pulse};
use crate::views::components::common::primitives::{apply_glow, fill_heart, ship_points};
use std::sync::Arc;

const FLASH_FREQUENCY: f32 = 0.5;

pub struct LivesDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    lives: u32,
    last_lives: Option<u32>,
    flash: FlashTimer,
    pulse: Pulse,
}

impl LivesDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            lives: 0,
            last_lives: None,
            flash: FlashTimer::default(),
            pulse: Pulse::default(),
        }
    }

    pub fn flash(&self) -> &FlashTimer {
        &self.flash
    }

    /// Icons actually drawn, capped by the layout.
    pub fn visible_count(&self) -> usize {
        (self.lives as usize).min(self.theme.layout.lives.max_display)
    }

    /// Center of the icon in `slot`.
    fn icon_center(&self, slot: usize) -> (f32, f32) {
        let layout = &self.theme.layout.lives;
        let (x, y) = self.position;
        (x + layout.icon_size / 2.0 + slot as f32 * layout.spacing, y)
    }

    fn draw_icon(&self, surface: &mut dyn Surface, style: LivesStyle, slot: usize) {
        let size = self.theme.layout.lives.icon_size;
        let (cx, cy) = self.icon_center(slot);
        match style {
            LivesStyle::Ships => surface.fill_polygon(&ship_points(cx, cy, size)),
            LivesStyle::Hearts => fill_heart(surface, cx, cy, size),
            LivesStyle::Dots => surface.fill_circle(cx, cy, size * 0.3),
        }
    }

    fn draw_row(&self, surface: &mut dyn Surface, style: LivesStyle) {
        let theme = &self.theme;
        let count = self.visible_count();

        // The newest icon carries the gain pulse.
        for slot in 0..count {
            if slot + 1 == count && self.pulse.scale() > 1.0 {
                let (cx, cy) = self.icon_center(slot);
                let scale = self.pulse.scale();
                surface.save();
                surface.translate(cx, cy);
                surface.scale(scale, scale);
                surface.translate(-cx, -cy);
                self.draw_icon(surface, style, slot);
                surface.restore();
            } else {
                self.draw_icon(surface, style, slot);
            }
        }

        // Ghost of the life just lost, fading with the flash.
        if self.flash.is_active() && count < theme.layout.lives.max_display {
            surface.save();
            surface.set_alpha(self.flash.progress());
            surface.set_fill(theme.colors.warning);
            self.draw_icon(surface, style, count);
            surface.restore();
        }
    }
}

impl HudWidget for LivesDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.lives.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        self.flash.tick(dt);
        self.pulse.tick(dt);

        if let Some(previous) = self.last_lives {
            if snapshot.lives < previous {
                self.flash.arm(self.theme.layout.lives.flash_duration);
            } else if snapshot.lives > previous {
                self.pulse.kick(1.4);
            }
        }
        self.last_lives = Some(snapshot.lives);
        self.lives = snapshot.lives;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.lives;
        if !layout.visible {
            return;
        }

        surface.save();
        surface.set_alpha(self.flash.alpha(FLASH_FREQUENCY));

        if layout.show_label {
            let font = FontSpec::new(&theme.fonts.primary, layout.font_size);
            let (x, y) = self.position;
            surface.set_fill(colors::with_alpha(theme.colors.text, 0.8));
            surface.fill_text(
                "LIVES",
                x,
                y - layout.icon_size - font.size * 0.4,
                &font,
                TextAlign::Left,
            );
        }

        apply_glow(surface, theme, theme.colors.lives);
        surface.set_fill(theme.colors.lives);
        self.draw_row(surface, layout.style);
        surface.restore();
    }

    fn reset(&mut self) {
        self.lives = 0;
        self.last_lives = None;
        self.flash.cancel();
        self.pulse = Pulse::default();
    }

    fn position(&self) -> (f32, f32) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::{Theme, ThemeRegistry};
    use crate::render::commands::{CommandList, DrawCommand};

    fn snapshot(lives: u32) -> GameSnapshot {
        GameSnapshot {
            lives,
            ..Default::default()
        }
    }

    #[test]
    fn test_losing_a_life_arms_flash_for_exact_duration() {
        let mut display = LivesDisplay::new(ThemeRegistry::builtin().get("neon"));
        let duration = display.theme.layout.lives.flash_duration;

        display.update(&snapshot(3), 1.0);
        assert!(!display.flash().is_active());

        display.update(&snapshot(2), 1.0);
        assert_eq!(display.flash().remaining(), duration);

        for tick in 1..=duration as usize {
            display.update(&snapshot(2), 1.0);
            assert_eq!(display.flash().remaining(), duration - tick as f32);
        }
        assert_eq!(display.flash().remaining(), 0.0);
        assert_eq!(display.flash().alpha(FLASH_FREQUENCY), 1.0);
    }

    #[test]
    fn test_extra_lives_are_dropped_silently() {
        let mut display = LivesDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(12), 1.0);
        assert_eq!(display.visible_count(), 5);

        let mut list = CommandList::new();
        display.draw(&mut list);
        let ships = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillPolygon(_)))
            .count();
        assert_eq!(ships, 5);
    }

    #[test]
    fn test_styles_draw_different_shapes() {
        let registry = ThemeRegistry::builtin();
        let mut hearts = LivesDisplay::new(registry.get("holo"));
        let mut dots = LivesDisplay::new(registry.get("minimal"));
        hearts.update(&snapshot(2), 1.0);
        dots.update(&snapshot(2), 1.0);

        let mut list = CommandList::new();
        dots.draw(&mut list);
        let circles = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 2);

        let mut list = CommandList::new();
        hearts.draw(&mut list);
        let circles = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 4);
    }

    #[test]
    fn test_resize_is_idempotent_and_handles_negative_offsets() {
        let mut display = LivesDisplay::new(Arc::new(Theme::default()));
        display.resize(800.0, 600.0);
        let first = display.position();
        display.resize(800.0, 600.0);
        assert_eq!(first, display.position());
        assert_eq!(first, (20.0, 560.0));
    }
}
