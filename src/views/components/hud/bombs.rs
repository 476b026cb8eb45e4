//! Bomb stock, right-aligned.

use super::HudWidget;
use crate::models::theme::hud::BombsStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{FlashTimer, Pulse};
use crate::views::components::common::primitives::{apply_glow, clear_glow, fill_bomb};
use std::sync::Arc;

const FLASH_FREQUENCY: f32 = 0.8;

pub struct BombsDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    bombs: u32,
    last_bombs: Option<u32>,
    flash: FlashTimer,
    pulse: Pulse,
}

impl BombsDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            bombs: 0,
            last_bombs: None,
            flash: FlashTimer::default(),
            pulse: Pulse::default(),
        }
    }

    pub fn flash(&self) -> &FlashTimer {
        &self.flash
    }

    pub fn visible_count(&self) -> usize {
        (self.bombs as usize).min(self.theme.layout.bombs.max_display)
    }

    /// Icons fill from the right edge toward the left.
    fn draw_icons(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.bombs;
        let (right, y) = self.position;
        let scale = self.pulse.scale();
        for slot in 0..self.visible_count() {
            let cx = right - layout.icon_size / 2.0 - slot as f32 * layout.spacing;
            fill_bomb(surface, cx, y, layout.icon_size * scale);
        }
    }

    fn draw_bar(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.bombs;
        let (right, y) = self.position;
        let cell = layout.icon_size * 0.6;
        let gap = 3.0;
        let filled = self.visible_count();
        for slot in 0..layout.max_display {
            let x = right - (slot + 1) as f32 * (cell + gap);
            if slot < filled {
                surface.set_fill(self.theme.colors.bombs);
            } else {
                surface.set_fill(colors::with_alpha(self.theme.colors.bombs, 0.2));
            }
            surface.fill_rect(x, y - cell / 2.0, cell, cell);
        }
    }

    fn draw_text(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.bombs;
        let (right, y) = self.position;
        let font = FontSpec::new(&self.theme.fonts.primary, layout.font_size * self.pulse.scale());
        clear_glow(surface);
        surface.fill_text(
            &format!("BOMBS x{}", self.visible_count()),
            right,
            y,
            &font,
            TextAlign::Right,
        );
    }
}

impl HudWidget for BombsDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.bombs.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        self.flash.tick(dt);
        self.pulse.tick(dt);

        if let Some(previous) = self.last_bombs {
            if snapshot.bombs < previous {
                self.flash.arm(self.theme.layout.bombs.flash_duration);
            } else if snapshot.bombs > previous {
                self.pulse.kick(1.3);
            }
        }
        self.last_bombs = Some(snapshot.bombs);
        self.bombs = snapshot.bombs;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        if !theme.layout.bombs.visible {
            return;
        }

        surface.save();
        surface.set_alpha(self.flash.alpha(FLASH_FREQUENCY));
        apply_glow(surface, theme, theme.colors.bombs);
        surface.set_fill(theme.colors.bombs);
        surface.set_stroke(theme.colors.bombs, 2.0);
        match theme.layout.bombs.style {
            BombsStyle::Icons => self.draw_icons(surface),
            BombsStyle::Bar => self.draw_bar(surface),
            BombsStyle::Text => self.draw_text(surface),
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.bombs = 0;
        self.last_bombs = None;
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
    use crate::models::theme::ThemeRegistry;
    use crate::render::commands::{CommandList, DrawCommand};

    fn snapshot(bombs: u32) -> GameSnapshot {
        GameSnapshot {
            bombs,
            ..Default::default()
        }
    }

    #[test]
    fn test_using_a_bomb_flashes() {
        let mut display = BombsDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(3), 1.0);
        display.update(&snapshot(2), 1.0);
        assert_eq!(
            display.flash().remaining(),
            display.theme.layout.bombs.flash_duration
        );
    }

    #[test]
    fn test_bar_style_keeps_max_cells() {
        let mut display = BombsDisplay::new(ThemeRegistry::builtin().get("minimal"));
        display.update(&snapshot(9), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        let cells = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(cells, display.theme.layout.bombs.max_display);
    }

    #[test]
    fn test_text_style_is_capped() {
        let mut display = BombsDisplay::new(ThemeRegistry::builtin().get("retro"));
        display.resize(1280.0, 720.0);
        display.update(&snapshot(42), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        assert_eq!(list.texts(), vec!["BOMBS x5"]);
        assert_eq!(display.position(), (1260.0, 680.0));
    }
}
