//! Wave counter and the delayed "WAVE N" banner.

use super::HudWidget;
use crate::models::theme::hud::WaveStyle;
use crate::models::theme::{Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{Deferred, FlashTimer};
use crate::views::components::common::primitives::{apply_glow, clear_glow, draw_panel};
use std::sync::Arc;

const FLASH_FREQUENCY: f32 = 0.35;
const BANNER_FADE_IN: f32 = 20.0;
const BANNER_FADE_OUT: f32 = 30.0;

pub struct WaveDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    wave: u32,
    last_wave: Option<u32>,
    flash: FlashTimer,
    pending_banner: Deferred<u32>,
    banner_wave: u32,
    banner: FlashTimer,
}

impl WaveDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            wave: 0,
            last_wave: None,
            flash: FlashTimer::default(),
            pending_banner: Deferred::default(),
            banner_wave: 0,
            banner: FlashTimer::default(),
        }
    }

    pub fn is_banner_pending(&self) -> bool {
        self.pending_banner.is_pending()
    }

    pub fn is_banner_showing(&self) -> bool {
        self.banner.is_active()
    }

    /// Banner opacity: fades in, holds, fades out.
    fn banner_alpha(&self) -> f32 {
        let duration = self.theme.layout.wave.banner_duration;
        let remaining = self.banner.remaining();
        let elapsed = duration - remaining;
        (elapsed / BANNER_FADE_IN)
            .min(remaining / BANNER_FADE_OUT)
            .clamp(0.0, 1.0)
    }

    fn label(&self) -> String {
        format!("WAVE {}", self.wave)
    }

    fn font(&self) -> FontSpec {
        FontSpec::new(&self.theme.fonts.primary, self.theme.layout.wave.font_size)
    }

    fn draw_default(&self, surface: &mut dyn Surface) {
        let (x, y) = self.position;
        apply_glow(surface, &self.theme, self.theme.colors.wave);
        surface.set_fill(self.theme.colors.wave);
        surface.fill_text(&self.label(), x, y, &self.font(), TextAlign::Center);
    }

    fn draw_banner_style(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let (x, y) = self.position;
        let font = self.font();
        let width = font.size * 6.0;
        let height = font.size * 1.6;
        draw_panel(surface, theme, x - width / 2.0, y - font.size * 1.1, width, height);

        apply_glow(surface, theme, theme.colors.wave);
        surface.set_fill(theme.colors.wave);
        surface.fill_text(&self.label(), x, y, &font, TextAlign::Center);
    }

    fn draw_ascii(&self, surface: &mut dyn Surface) {
        let (x, y) = self.position;
        clear_glow(surface);
        surface.set_fill(self.theme.colors.wave);
        surface.fill_text(
            &format!("== WAVE {:02} ==", self.wave),
            x,
            y,
            &self.font(),
            TextAlign::Center,
        );
    }

    fn draw_big_banner(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let (width, height) = self.screen;
        let font = FontSpec::new(&theme.fonts.title, theme.layout.wave.font_size * 2.4);
        let text = match theme.layout.wave.style {
            WaveStyle::Ascii => format!(">> WAVE {:02} <<", self.banner_wave),
            _ => format!("WAVE {}", self.banner_wave),
        };

        surface.save();
        surface.set_alpha(self.banner_alpha());
        apply_glow(surface, theme, theme.colors.glow);
        surface.set_fill(theme.colors.wave);
        surface.fill_text(&text, width / 2.0, height * 0.4, &font, TextAlign::Center);
        surface.set_fill(colors::with_alpha(theme.colors.text, 0.8));
        surface.fill_text(
            "GET READY",
            width / 2.0,
            height * 0.4 + font.size,
            &FontSpec::new(&theme.fonts.primary, font.size * 0.35),
            TextAlign::Center,
        );
        surface.restore();
    }
}

impl HudWidget for WaveDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.wave.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.wave;
        self.flash.tick(dt);
        self.banner.tick(dt);
        if let Some(wave) = self.pending_banner.tick(dt) {
            self.banner_wave = wave;
            self.banner.arm(layout.banner_duration);
        }

        if let Some(previous) = self.last_wave
            && snapshot.wave > previous
        {
            self.flash.arm(layout.flash_duration);
            if layout.show_banner {
                self.pending_banner.schedule(layout.banner_delay, snapshot.wave);
            }
        }
        self.last_wave = Some(snapshot.wave);
        self.wave = snapshot.wave;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.wave;
        if !layout.visible {
            return;
        }

        surface.save();
        surface.set_alpha(self.flash.alpha(FLASH_FREQUENCY));
        match layout.style {
            WaveStyle::Default => self.draw_default(surface),
            WaveStyle::Banner => self.draw_banner_style(surface),
            WaveStyle::Ascii => self.draw_ascii(surface),
        }
        surface.restore();

        if self.banner.is_active() {
            self.draw_big_banner(surface);
        }
    }

    fn reset(&mut self) {
        self.wave = 0;
        self.last_wave = None;
        self.flash.cancel();
        self.pending_banner.cancel();
        self.banner.cancel();
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

    fn snapshot(wave: u32) -> GameSnapshot {
        GameSnapshot {
            wave,
            ..Default::default()
        }
    }

    #[test]
    fn test_banner_starts_after_delay() {
        let mut display = WaveDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.resize(1280.0, 720.0);
        let delay = display.theme.layout.wave.banner_delay as usize;

        display.update(&snapshot(1), 1.0);
        display.update(&snapshot(2), 1.0);
        assert!(display.is_banner_pending());
        assert!(!display.is_banner_showing());

        for _ in 0..delay {
            display.update(&snapshot(2), 1.0);
        }
        assert!(display.is_banner_showing());

        let mut list = CommandList::new();
        display.draw(&mut list);
        assert!(list.texts().contains(&"GET READY"));
    }

    #[test]
    fn test_reset_cancels_pending_banner() {
        let mut display = WaveDisplay::new(ThemeRegistry::builtin().get("neon"));
        display.update(&snapshot(1), 1.0);
        display.update(&snapshot(2), 1.0);
        display.reset();
        for _ in 0..200 {
            display.update(&snapshot(0), 1.0);
        }
        assert!(!display.is_banner_showing());
    }

    #[test]
    fn test_ascii_style_pads_wave() {
        let mut display = WaveDisplay::new(ThemeRegistry::builtin().get("retro"));
        display.update(&snapshot(7), 1.0);
        let mut list = CommandList::new();
        display.draw(&mut list);
        assert_eq!(list.texts(), vec!["== WAVE 07 =="]);
    }
}
