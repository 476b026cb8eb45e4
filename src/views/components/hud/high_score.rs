//! High score readout. Celebrates once the running score passes the record it started with.

use super::HudWidget;
use crate::models::theme::hud::HighScoreStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{FlashTimer, RainbowCycle, Tween};
use crate::views::components::common::primitives::{apply_glow, clear_glow, group_thousands};
use std::sync::Arc;

const FLASH_FREQUENCY: f32 = 0.4;

pub struct HighScoreDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    value: Tween,
    best: u64,
    /// Record at the start of the run.
    starting: Option<u64>,
    beaten: bool,
    flash: FlashTimer,
    rainbow: RainbowCycle,
}

impl HighScoreDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        let rate = theme.layout.high_score.catch_up;
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            value: Tween::new(0.0, rate),
            best: 0,
            starting: None,
            beaten: false,
            flash: FlashTimer::default(),
            rainbow: RainbowCycle::default(),
        }
    }

    pub fn is_new_record(&self) -> bool {
        self.beaten
    }

    pub fn flash(&self) -> &FlashTimer {
        &self.flash
    }

    pub fn displayed(&self) -> u64 {
        if self.value.settled() {
            self.best
        } else {
            self.value.display.max(0.0).round() as u64
        }
    }

    fn number_color(&self) -> [f32; 4] {
        if self.beaten {
            self.rainbow.color()
        } else {
            self.theme.colors.secondary
        }
    }

    fn draw_default(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.high_score;
        let (x, mut y) = self.position;

        if layout.show_label {
            let label = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.7);
            surface.set_fill(colors::with_alpha(theme.colors.text, 0.7));
            surface.fill_text("HI-SCORE", x, y, &label, TextAlign::Right);
            y += label.size * 1.4;
        }

        let font = FontSpec::new(&theme.fonts.score, layout.font_size);
        apply_glow(surface, theme, self.number_color());
        surface.set_fill(self.number_color());
        surface.fill_text(
            &group_thousands(self.displayed()),
            x,
            y,
            &font,
            TextAlign::Right,
        );

        if self.beaten {
            surface.save();
            surface.set_alpha(self.flash.alpha(FLASH_FREQUENCY));
            surface.set_fill(theme.colors.success);
            surface.fill_text(
                "NEW RECORD!",
                x,
                y + font.size * 1.2,
                &FontSpec::new(&theme.fonts.primary, layout.font_size * 0.7),
                TextAlign::Right,
            );
            surface.restore();
        }
    }

    fn draw_compact(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.high_score;
        let (x, y) = self.position;
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size);
        let prefix = if self.beaten { "NEW HI" } else { "HI" };

        clear_glow(surface);
        surface.set_alpha(self.flash.alpha(FLASH_FREQUENCY));
        surface.set_fill(self.number_color());
        surface.fill_text(
            &format!("{} {:06}", prefix, self.displayed()),
            x,
            y,
            &font,
            TextAlign::Right,
        );
    }
}

impl HudWidget for HighScoreDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.value.rate = self.theme.layout.high_score.catch_up;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.high_score.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.high_score;
        self.flash.tick(dt);
        if self.beaten {
            self.rainbow.tick(dt, layout.rainbow_speed);
        }

        let best = snapshot.high_score.max(snapshot.score);
        let starting = *self.starting.get_or_insert_with(|| {
            self.value.reset(best as f32);
            snapshot.high_score
        });

        if !self.beaten && snapshot.score > starting {
            self.beaten = true;
            self.flash.arm(layout.flash_duration);
            log::info!("HUD: new high score {}", snapshot.score);
        }

        if best < self.best {
            self.value.reset(best as f32);
        }
        self.best = best;
        self.value.set_target(best as f32);
        self.value.tick(dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.high_score;
        if !layout.visible {
            return;
        }
        surface.save();
        match layout.style {
            HighScoreStyle::Default => self.draw_default(surface),
            HighScoreStyle::Compact => self.draw_compact(surface),
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.value.reset(0.0);
        self.best = 0;
        self.starting = None;
        self.beaten = false;
        self.flash.cancel();
        self.rainbow = RainbowCycle::default();
    }

    fn position(&self) -> (f32, f32) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::ThemeRegistry;
    use crate::render::commands::CommandList;

    fn snapshot(score: u64, high_score: u64) -> GameSnapshot {
        GameSnapshot {
            score,
            high_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_record_only_after_passing_starting_record() {
        let mut display = HighScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(0, 10_000), 1.0);
        assert_eq!(display.displayed(), 10_000);

        display.update(&snapshot(10_000, 10_000), 1.0);
        assert!(!display.is_new_record());

        display.update(&snapshot(10_050, 10_000), 1.0);
        assert!(display.is_new_record());
        assert_eq!(
            display.flash().remaining(),
            display.theme.layout.high_score.flash_duration
        );

        let mut list = CommandList::new();
        display.draw(&mut list);
        assert!(list.texts().contains(&"NEW RECORD!"));
    }

    #[test]
    fn test_tracks_running_score_past_record() {
        let mut display = HighScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(0, 500), 1.0);
        for _ in 0..200 {
            display.update(&snapshot(2_000, 500), 1.0);
        }
        assert_eq!(display.displayed(), 2_000);
    }

    #[test]
    fn test_compact_style() {
        let mut display = HighScoreDisplay::new(ThemeRegistry::builtin().get("retro"));
        display.update(&snapshot(0, 4_200), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        assert_eq!(list.texts(), vec!["HI 004200"]);
    }

    #[test]
    fn test_reset_forgets_starting_record() {
        let mut display = HighScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(0, 100), 1.0);
        display.update(&snapshot(200, 100), 1.0);
        assert!(display.is_new_record());

        display.reset();
        display.update(&snapshot(0, 200), 1.0);
        assert!(!display.is_new_record());
    }
}
