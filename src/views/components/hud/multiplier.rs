//! Big "xN" popup shown when the score multiplier changes.

use super::HudWidget;
use crate::models::theme::hud::MultiplierStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{FlashTimer, Pulse};
use crate::views::components::common::primitives::apply_glow;
use std::f32::consts::TAU;
use std::sync::Arc;

const SPOKES: usize = 12;
const SPIN_SPEED: f32 = 0.04;

pub struct MultiplierPopup {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    multiplier: u32,
    life: FlashTimer,
    pulse: Pulse,
    spin: f32,
}

impl MultiplierPopup {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            multiplier: 1,
            life: FlashTimer::default(),
            pulse: Pulse::new(0.12),
            spin: 0.0,
        }
    }

    /// Shows `multiplier`, replacing a popup still on screen.
    pub fn trigger(&mut self, multiplier: u32) {
        let layout = &self.theme.layout.multiplier;
        self.multiplier = multiplier;
        self.life.arm(layout.lifetime);
        self.pulse.kick(layout.pulse_scale);
    }

    pub fn is_active(&self) -> bool {
        self.life.is_active()
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Full opacity until the last `fade_window` frames.
    pub fn alpha(&self) -> f32 {
        let fade_window = self.theme.layout.multiplier.fade_window;
        let remaining = self.life.remaining();
        if remaining <= 0.0 {
            0.0
        } else if fade_window <= 0.0 {
            1.0
        } else {
            (remaining / fade_window).min(1.0)
        }
    }

    fn draw_burst(&self, surface: &mut dyn Surface, x: f32, y: f32) {
        let theme = &self.theme;
        let inner = theme.layout.multiplier.font_size * 0.8;
        let outer = inner * 1.8 * self.pulse.scale();

        surface.set_stroke(colors::with_alpha(theme.colors.accent, 0.6), 3.0);
        for i in 0..SPOKES {
            let angle = self.spin + i as f32 / SPOKES as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            surface.line(x + cos * inner, y + sin * inner, x + cos * outer, y + sin * outer);
        }
    }
}

impl HudWidget for MultiplierPopup {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.multiplier.position.resolve(width, height);
    }

    fn update(&mut self, _snapshot: &GameSnapshot, dt: f32) {
        self.life.tick(dt);
        self.pulse.tick(dt);
        self.spin = (self.spin + SPIN_SPEED * dt).rem_euclid(TAU);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.multiplier;
        if !layout.visible || !self.life.is_active() {
            return;
        }

        let (x, y) = self.position;
        surface.save();
        surface.set_alpha(self.alpha());
        apply_glow(surface, theme, theme.colors.accent);
        if layout.style == MultiplierStyle::Burst {
            self.draw_burst(surface, x, y);
        }

        let scale = self.pulse.scale();
        surface.translate(x, y);
        surface.scale(scale, scale);
        surface.set_fill(theme.colors.accent);
        surface.fill_text(
            &format!("x{}", self.multiplier),
            0.0,
            0.0,
            &FontSpec::new(&theme.fonts.title, layout.font_size),
            TextAlign::Center,
        );
        surface.restore();
    }

    fn reset(&mut self) {
        self.multiplier = 1;
        self.life.cancel();
        self.pulse = Pulse::new(0.12);
        self.spin = 0.0;
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

    #[test]
    fn test_last_trigger_wins() {
        let mut popup = MultiplierPopup::new(ThemeRegistry::builtin().get("neon"));
        let lifetime = popup.theme.layout.multiplier.lifetime;
        popup.trigger(2);
        for _ in 0..30 {
            popup.update(&GameSnapshot::default(), 1.0);
        }
        popup.trigger(3);
        assert_eq!(popup.multiplier(), 3);
        assert_eq!(popup.life.remaining(), lifetime);
        assert_eq!(popup.alpha(), 1.0);

        let mut list = CommandList::new();
        popup.draw(&mut list);
        assert_eq!(list.texts(), vec!["x3"]);
    }

    #[test]
    fn test_fades_out_and_stops_drawing() {
        let mut popup = MultiplierPopup::new(ThemeRegistry::builtin().get("neon"));
        let layout = popup.theme.layout.multiplier.clone();
        popup.trigger(4);
        for _ in 0..(layout.lifetime - layout.fade_window / 2.0) as usize {
            popup.update(&GameSnapshot::default(), 1.0);
        }
        assert!((popup.alpha() - 0.5).abs() < 1e-4);

        for _ in 0..layout.fade_window as usize {
            popup.update(&GameSnapshot::default(), 1.0);
        }
        assert!(!popup.is_active());
        let mut list = CommandList::new();
        popup.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_burst_style_draws_spokes() {
        let mut popup = MultiplierPopup::new(ThemeRegistry::builtin().get("holo"));
        popup.trigger(5);
        let mut list = CommandList::new();
        popup.draw(&mut list);
        let spokes = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
            .count();
        assert_eq!(spokes, SPOKES);
    }
}
