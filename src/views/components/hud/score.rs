//! Score counter with rolling digits and floating "+points" popups.

use super::{GLYPH_WIDTH, HudWidget};
use crate::models::theme::hud::ScoreStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{Pulse, Tween};
use crate::views::components::common::popup::{FloatingText, PopupColor, PopupList};
use crate::views::components::common::primitives::{apply_glow, clear_glow, group_thousands};
use std::sync::Arc;

/// Popup start points are spread over this radius.
const POPUP_JITTER: f32 = 8.0;
const POPUP_RISE: f32 = -1.6;
/// Popup text size relative to the score font, growing with the combo tier.
const POPUP_SCALE: f32 = 0.6;
const POPUP_SCALE_PER_TIER: f32 = 0.1;

pub struct ScoreDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    value: Tween,
    score: u64,
    pulse: Pulse,
    popups: PopupList,
}

impl ScoreDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        let rate = theme.layout.score.catch_up;
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            value: Tween::new(0.0, rate),
            score: 0,
            pulse: Pulse::default(),
            popups: PopupList::default(),
        }
    }

    /// Spawns a "+points" popup at a playfield position, sized by the combo tier.
    pub fn spawn_popup(
        &mut self,
        points: u64,
        x: f32,
        y: f32,
        color: impl Into<PopupColor>,
        tier: usize,
    ) {
        let layout = &self.theme.layout.score;
        let popup = FloatingText::new(format!("+{}", points), x, y, layout.popup_lifetime, color)
            .with_velocity(0.0, POPUP_RISE)
            .with_gravity(layout.popup_gravity)
            .with_fade(layout.popup_fade)
            .with_scale(POPUP_SCALE + POPUP_SCALE_PER_TIER * tier as f32)
            .jittered(POPUP_JITTER);
        self.popups.push(popup);
    }

    /// Number currently shown, exact once the roll has settled.
    pub fn displayed(&self) -> u64 {
        if self.value.settled() {
            self.score
        } else {
            self.value.display.max(0.0).round() as u64
        }
    }

    pub fn popups(&self) -> &PopupList {
        &self.popups
    }

    fn score_font(&self) -> FontSpec {
        FontSpec::new(&self.theme.fonts.score, self.theme.layout.score.font_size)
    }

    fn draw_default(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.score;
        let (x, mut y) = self.position;

        if layout.show_label {
            let label = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.45);
            surface.set_fill(theme.colors.text);
            surface.fill_text("SCORE", x, y, &label, TextAlign::Left);
            y += label.size * 1.3;
        }

        let scale = self.pulse.scale();
        surface.translate(x, y);
        surface.scale(scale, scale);
        apply_glow(surface, theme, theme.colors.glow);
        surface.set_fill(theme.colors.score);
        surface.fill_text(
            &group_thousands(self.displayed()),
            0.0,
            0.0,
            &self.score_font(),
            TextAlign::Left,
        );
    }

    fn draw_digital(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.score;
        let (x, mut y) = self.position;

        if layout.show_label {
            let label = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.45);
            surface.set_fill(colors::with_alpha(theme.colors.text, 0.7));
            surface.fill_text("SCORE", x, y, &label, TextAlign::Left);
            y += label.size * 1.3;
        }

        let digits = self.displayed().to_string();
        let padded = format!("{:0>width$}", digits, width = layout.digits);
        let lead = padded.len() - digits.len();
        let font = self.score_font();

        // Unlit segments first, then the lit digits on top of them.
        clear_glow(surface);
        surface.set_fill(colors::with_alpha(theme.colors.score, 0.2));
        surface.fill_text(&padded[..lead], x, y, &font, TextAlign::Left);

        apply_glow(surface, theme, theme.colors.score);
        surface.set_fill(theme.colors.score);
        let offset = lead as f32 * font.size * GLYPH_WIDTH;
        surface.fill_text(&digits, x + offset, y, &font, TextAlign::Left);
    }

    fn draw_minimal(&self, surface: &mut dyn Surface) {
        let (x, y) = self.position;
        clear_glow(surface);
        surface.set_fill(self.theme.colors.score);
        surface.fill_text(
            &self.displayed().to_string(),
            x,
            y,
            &self.score_font(),
            TextAlign::Left,
        );
    }

    fn draw_popups(&self, surface: &mut dyn Surface) {
        for popup in self.popups.iter() {
            let size = self.theme.layout.score.font_size * popup.scale;
            let font = FontSpec::new(&self.theme.fonts.score, size);
            surface.save();
            surface.set_alpha(popup.alpha());
            surface.set_fill(popup.color.resolve(&self.theme));
            surface.fill_text(&popup.text, popup.x, popup.y, &font, TextAlign::Center);
            surface.restore();
        }
    }
}

impl HudWidget for ScoreDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.value.rate = self.theme.layout.score.catch_up;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.score.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        self.pulse.tick(dt);
        self.popups.tick(dt);

        if snapshot.score < self.score {
            // Score went down: a new run started, do not roll backwards.
            self.value.reset(snapshot.score as f32);
        } else if snapshot.score > self.score {
            self.pulse.kick(1.12);
        }
        self.score = snapshot.score;

        self.value.set_target(snapshot.score as f32);
        self.value.tick(dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.theme.layout.score.visible {
            return;
        }
        surface.save();
        match self.theme.layout.score.style {
            ScoreStyle::Default => self.draw_default(surface),
            ScoreStyle::Digital => self.draw_digital(surface),
            ScoreStyle::Minimal => self.draw_minimal(surface),
        }
        surface.restore();
        self.draw_popups(surface);
    }

    fn reset(&mut self) {
        self.value.reset(0.0);
        self.score = 0;
        self.pulse = Pulse::default();
        self.popups.clear();
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

    fn snapshot(score: u64) -> GameSnapshot {
        GameSnapshot {
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_score_rolls_up_to_target() {
        let mut display = ScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.resize(1280.0, 720.0);
        display.update(&snapshot(5000), 1.0);
        assert!(display.displayed() < 5000);

        for _ in 0..200 {
            display.update(&snapshot(5000), 1.0);
        }
        assert_eq!(display.displayed(), 5000);
    }

    #[test]
    fn test_large_scores_display_exactly_once_settled() {
        let mut display = ScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        for _ in 0..300 {
            display.update(&snapshot(123_456_789), 1.0);
        }
        assert_eq!(display.displayed(), 123_456_789);
    }

    #[test]
    fn test_popups_expire() {
        let mut display = ScoreDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.spawn_popup(100, 200.0, 300.0, colors::YELLOW, 0);
        display.spawn_popup(250, 220.0, 310.0, colors::CYAN, 2);
        assert_eq!(display.popups().len(), 2);

        let mut list = CommandList::new();
        display.draw(&mut list);
        assert!(list.texts().contains(&"+100"));

        let lifetime = display.theme.layout.score.popup_lifetime as usize;
        for _ in 0..lifetime {
            display.update(&snapshot(0), 1.0);
        }
        assert!(display.popups().is_empty());
    }

    #[test]
    fn test_every_style_draws_the_number() {
        let registry = ThemeRegistry::builtin();
        for theme in registry.iter() {
            let mut display = ScoreDisplay::new(Arc::clone(theme));
            display.resize(1920.0, 1080.0);
            for _ in 0..300 {
                display.update(&snapshot(4200), 1.0);
            }
            let mut list = CommandList::new();
            display.draw(&mut list);
            let joined = list.texts().concat();
            assert!(joined.contains("4200") || joined.contains("4,200"), "{}", theme.id);
        }
    }
}
