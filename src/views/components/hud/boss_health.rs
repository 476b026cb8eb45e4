//! Boss health bar. Shown and hidden by gameplay triggers, fed by the snapshot.

use super::HudWidget;
use crate::models::theme::hud::BossHealthStyle;
use crate::models::theme::{Color, Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{Fade, FlashTimer, Tween, flicker};
use crate::views::components::common::primitives::{
    apply_glow, ascii_gauge, clear_glow, draw_bar, draw_panel,
};
use std::sync::Arc;

const FRACTION_EPSILON: f32 = 0.001;
const LOW_HEALTH_FREQUENCY: f32 = 0.3;
const SEGMENT_GAP: f32 = 2.0;

pub struct BossHealthDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    name: String,
    fade: Fade,
    health: Tween,
    /// Lags behind `health` to show the chunk just lost.
    trail: Tween,
    last_fraction: Option<f32>,
    flash: FlashTimer,
    time: f32,
}

impl BossHealthDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        let layout = &theme.layout.boss_health;
        let health = Tween::new(1.0, layout.catch_up).with_epsilon(FRACTION_EPSILON);
        let trail = Tween::new(1.0, layout.trail_catch_up).with_epsilon(FRACTION_EPSILON);
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            name: String::new(),
            fade: Fade::default(),
            health,
            trail,
            last_fraction: None,
            flash: FlashTimer::default(),
            time: 0.0,
        }
    }

    /// Starts fading the bar in for a new boss at full health.
    pub fn show(&mut self, name: &str) {
        self.name = name.to_string();
        self.health.reset(1.0);
        self.trail.reset(1.0);
        self.last_fraction = None;
        self.flash.cancel();
        self.fade.show();
    }

    pub fn hide(&mut self) {
        self.fade.hide();
    }

    pub fn is_shown(&self) -> bool {
        self.fade.is_shown()
    }

    pub fn is_visible(&self) -> bool {
        self.fade.is_visible()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Displayed health fraction.
    pub fn displayed(&self) -> f32 {
        self.health.display
    }

    pub fn flash(&self) -> &FlashTimer {
        &self.flash
    }

    fn is_low(&self) -> bool {
        self.health.target <= self.theme.layout.boss_health.low_health
    }

    fn bar_color(&self) -> Color {
        let c = &self.theme.colors;
        let base = if self.is_low() {
            colors::mix(c.warning, c.text, flicker(self.time, LOW_HEALTH_FREQUENCY) * 0.5)
        } else {
            c.primary
        };
        colors::mix(base, colors::WHITE, self.flash.progress() * 0.7)
    }

    /// Top-left corner of the bar.
    fn origin(&self) -> (f32, f32) {
        let size = &self.theme.layout.boss_health.size;
        (self.position.0 - size.x / 2.0, self.position.1)
    }

    fn name_font(&self) -> FontSpec {
        FontSpec::new(&self.theme.fonts.title, self.theme.layout.boss_health.font_size)
    }

    fn draw_name(&self, surface: &mut dyn Surface, align: TextAlign) {
        let layout = &self.theme.layout.boss_health;
        if !layout.show_name || self.name.is_empty() {
            return;
        }
        let (x, y) = self.origin();
        let font = self.name_font();
        let tx = match align {
            TextAlign::Left => x,
            TextAlign::Center => self.position.0,
            TextAlign::Right => x + layout.size.x,
        };
        surface.set_fill(self.theme.colors.text);
        surface.fill_text(&self.name, tx, y - font.size * 0.5, &font, align);
    }

    fn draw_default(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let size = &theme.layout.boss_health.size;
        let (x, y) = self.origin();
        let pad = 4.0;

        draw_panel(surface, theme, x - pad, y - pad, size.x + pad * 2.0, size.y + pad * 2.0);
        self.draw_name(surface, TextAlign::Center);

        surface.set_fill(colors::with_alpha(theme.colors.text, 0.45));
        surface.fill_rect(x, y, size.x * self.trail.display, size.y);

        apply_glow(surface, theme, self.bar_color());
        draw_bar(
            surface,
            x,
            y,
            size.x,
            size.y,
            self.health.display,
            self.bar_color(),
            colors::with_alpha(colors::BLACK, 0.0),
        );
    }

    fn draw_segmented(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.boss_health;
        let segments = layout.segments.max(1);
        let (x, y) = self.origin();
        let width = (layout.size.x - SEGMENT_GAP * (segments - 1) as f32) / segments as f32;
        let lit = (self.health.display * segments as f32).ceil() as usize;
        let trail = (self.trail.display * segments as f32).ceil() as usize;

        self.draw_name(surface, TextAlign::Left);
        apply_glow(surface, theme, self.bar_color());
        for i in 0..segments {
            let color = if i < lit {
                self.bar_color()
            } else if i < trail {
                colors::with_alpha(theme.colors.text, 0.45)
            } else {
                colors::with_alpha(theme.colors.panel_border, 0.3)
            };
            surface.set_fill(color);
            surface.fill_rect(
                x + i as f32 * (width + SEGMENT_GAP),
                y,
                width,
                layout.size.y,
            );
        }
    }

    fn draw_ascii(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.boss_health;
        let (x, y) = self.position;
        let font = FontSpec::new(&self.theme.fonts.primary, layout.font_size);
        let percent = (self.health.display * 100.0).round() as u32;
        let name = if layout.show_name { self.name.as_str() } else { "BOSS" };

        clear_glow(surface);
        surface.set_fill(self.bar_color());
        surface.fill_text(
            &format!(
                "{} {} {:>3}%",
                name,
                ascii_gauge(self.health.display, layout.segments),
                percent
            ),
            x,
            y,
            &font,
            TextAlign::Center,
        );
    }

    fn draw_thin(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.boss_health;
        let (x, y) = self.origin();
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.8);

        clear_glow(surface);
        self.draw_name(surface, TextAlign::Left);
        surface.set_fill(colors::with_alpha(theme.colors.text, 0.7));
        surface.fill_text(
            &format!("{}%", (self.health.display * 100.0).round() as u32),
            x + layout.size.x,
            y - font.size * 0.5,
            &font,
            TextAlign::Right,
        );
        draw_bar(
            surface,
            x,
            y,
            layout.size.x,
            layout.size.y,
            self.health.display,
            self.bar_color(),
            colors::with_alpha(theme.colors.text, 0.15),
        );
    }
}

impl HudWidget for BossHealthDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.health.rate = self.theme.layout.boss_health.catch_up;
        self.trail.rate = self.theme.layout.boss_health.trail_catch_up;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.boss_health.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.boss_health;
        self.flash.tick(dt);
        self.time += dt;

        if let Some(boss) = &snapshot.boss {
            let fraction = boss.fraction();
            if self.last_fraction.is_some_and(|previous| fraction < previous) {
                self.flash.arm(layout.flash_duration);
            }
            self.last_fraction = Some(fraction);
            if self.name.is_empty() {
                self.name = boss.name.clone();
            }

            self.health.set_target(fraction);
            if fraction > self.trail.display {
                self.trail.reset(fraction);
            } else {
                self.trail.set_target(fraction);
            }
        }

        self.health.tick(dt);
        self.trail.tick(dt);
        self.fade.tick(dt, layout.fade_speed);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.boss_health;
        if !layout.visible || !self.fade.is_visible() {
            return;
        }

        surface.save();
        surface.set_alpha(self.fade.value());
        match layout.style {
            BossHealthStyle::Default => self.draw_default(surface),
            BossHealthStyle::Segmented => self.draw_segmented(surface),
            BossHealthStyle::Ascii => self.draw_ascii(surface),
            BossHealthStyle::Thin => self.draw_thin(surface),
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.name.clear();
        self.fade = Fade::default();
        self.health.reset(1.0);
        self.trail.reset(1.0);
        self.last_fraction = None;
        self.flash.cancel();
        self.time = 0.0;
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
    use crate::shared::snapshot::BossInfo;

    fn snapshot(health: f32) -> GameSnapshot {
        GameSnapshot {
            boss: Some(BossInfo {
                name: "DREADNOUGHT".to_string(),
                health,
                max_health: 100.0,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_hidden_until_shown() {
        let mut display = BossHealthDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(100.0), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        assert!(list.is_empty());

        display.show("DREADNOUGHT");
        display.update(&snapshot(100.0), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        assert!(list.texts().contains(&"DREADNOUGHT"));
    }

    #[test]
    fn test_damage_flashes_and_bar_catches_up() {
        let mut display = BossHealthDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.show("DREADNOUGHT");
        display.update(&snapshot(100.0), 1.0);
        display.update(&snapshot(40.0), 1.0);
        assert!(display.flash().is_active());
        assert!(display.displayed() > 0.4);

        for _ in 0..300 {
            display.update(&snapshot(40.0), 1.0);
        }
        assert_eq!(display.displayed(), 0.4);
        assert!(display.trail.display <= 0.4 + FRACTION_EPSILON);
    }

    #[test]
    fn test_hide_fades_out() {
        let mut display = BossHealthDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.show("DREADNOUGHT");
        for _ in 0..40 {
            display.update(&snapshot(80.0), 1.0);
        }
        display.hide();
        for _ in 0..40 {
            display.update(&GameSnapshot::default(), 1.0);
        }
        assert!(!display.is_visible());
    }

    #[test]
    fn test_ascii_and_segmented_styles() {
        let registry = ThemeRegistry::builtin();

        let mut ascii = BossHealthDisplay::new(registry.get("retro"));
        ascii.show("HIVE");
        for _ in 0..100 {
            ascii.update(&snapshot(50.0), 1.0);
        }
        let mut list = CommandList::new();
        ascii.draw(&mut list);
        let expected = format!("HIVE {}  50%", ascii_gauge(0.5, 24));
        assert_eq!(list.texts(), vec![expected.as_str()]);

        let mut segmented = BossHealthDisplay::new(registry.get("holo"));
        segmented.show("HIVE");
        segmented.update(&snapshot(50.0), 1.0);
        let mut list = CommandList::new();
        segmented.draw(&mut list);
        let cells = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { .. }))
            .count();
        assert_eq!(cells, segmented.theme.layout.boss_health.segments);
    }
}
