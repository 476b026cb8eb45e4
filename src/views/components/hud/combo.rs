//! Combo meter with tier names, multiplier and the combo-timer gauge.

use super::HudWidget;
use crate::models::theme::hud::ComboStyle;
use crate::models::theme::{Color, Theme, colors};
use crate::models::tiers::{Tier, TierTable, combo_tiers};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::anim::{Fade, FlashTimer, Pulse, RainbowCycle};
use crate::views::components::common::popup::PopupColor;
use crate::views::components::common::primitives::{
    apply_glow, ascii_gauge, clear_glow, draw_bar,
};
use std::sync::Arc;

const TIER_FLASH: f32 = 30.0;
const BREAK_FLASH: f32 = 30.0;
const RAINBOW_SPEED: f32 = 6.0;
const ASCII_CELLS: usize = 10;

pub struct ComboDisplay {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    tiers: TierTable,
    combo: u32,
    last_combo: Option<u32>,
    broken_at: u32,
    level: usize,
    timer_fraction: f32,
    pulse: Pulse,
    tier_flash: FlashTimer,
    break_flash: FlashTimer,
    fade: Fade,
    rainbow: RainbowCycle,
}

impl ComboDisplay {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            tiers: combo_tiers(),
            combo: 0,
            last_combo: None,
            broken_at: 0,
            level: 0,
            timer_fraction: 0.0,
            pulse: Pulse::default(),
            tier_flash: FlashTimer::default(),
            break_flash: FlashTimer::default(),
            fade: Fade::default(),
            rainbow: RainbowCycle::default(),
        }
    }

    pub fn current_tier(&self) -> &Tier {
        self.tiers.select(self.combo)
    }

    /// Score multiplier granted by the current tier.
    pub fn multiplier(&self) -> u32 {
        1 + self.level as u32
    }

    pub fn is_broken(&self) -> bool {
        self.break_flash.is_active()
    }

    pub fn fade(&self) -> &Fade {
        &self.fade
    }

    /// Index of the current tier, 0 below the first threshold.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Color for a popup spawned now. Below the first tier it keeps following the theme.
    pub fn popup_color(&self) -> PopupColor {
        if self.level == 0 {
            PopupColor::ThemeCombo
        } else {
            PopupColor::Fixed(self.tier_color())
        }
    }

    /// Tier color, cycling through the rainbow at the top tier.
    pub fn tier_color(&self) -> Color {
        if self.level == 0 {
            self.theme.colors.combo
        } else if self.level == self.tiers.top_level() {
            self.rainbow.color()
        } else {
            self.current_tier().color
        }
    }

    fn combo_font(&self) -> FontSpec {
        FontSpec::new(
            &self.theme.fonts.score,
            self.theme.layout.combo.font_size * self.pulse.scale(),
        )
    }

    fn label_font(&self) -> FontSpec {
        FontSpec::new(&self.theme.fonts.primary, self.theme.layout.combo.font_size * 0.4)
    }

    fn draw_tier_name(&self, surface: &mut dyn Surface, x: f32, y: f32) {
        let name = &self.current_tier().name;
        if name.is_empty() {
            return;
        }
        surface.save();
        if self.tier_flash.is_active() {
            surface.set_alpha(self.tier_flash.alpha(0.6));
        }
        surface.set_fill(self.tier_color());
        surface.fill_text(name, x, y, &self.label_font(), TextAlign::Right);
        surface.restore();
    }

    fn draw_gauge(&self, surface: &mut dyn Surface, x: f32, y: f32, height: f32) {
        let layout = &self.theme.layout.combo;
        if !layout.show_progress {
            return;
        }
        draw_bar(
            surface,
            x - layout.bar_width,
            y,
            layout.bar_width,
            height,
            self.timer_fraction,
            self.tier_color(),
            colors::with_alpha(self.theme.colors.panel_background, 0.8),
        );
    }

    fn draw_default(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.combo;
        let (x, y) = self.position;
        let label = self.label_font();

        apply_glow(surface, theme, self.tier_color());
        surface.set_fill(self.tier_color());
        surface.fill_text(
            &self.combo.to_string(),
            x,
            y,
            &self.combo_font(),
            TextAlign::Right,
        );

        let mut line = y + label.size * 1.4;
        surface.set_fill(theme.colors.text);
        let caption = if layout.show_multiplier {
            format!("COMBO x{}", self.multiplier())
        } else {
            "COMBO".to_string()
        };
        surface.fill_text(&caption, x, line, &label, TextAlign::Right);

        line += label.size * 1.3;
        self.draw_tier_name(surface, x, line);
        self.draw_gauge(surface, x, line + label.size * 0.6, 6.0);
    }

    fn draw_line(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.combo;
        let (x, y) = self.position;
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.5);

        clear_glow(surface);
        surface.set_fill(self.tier_color());
        let mut text = format!("{} COMBO", self.combo);
        if layout.show_multiplier {
            text.push_str(&format!("  x{}", self.multiplier()));
        }
        surface.fill_text(&text, x, y, &font, TextAlign::Right);
        self.draw_gauge(surface, x, y + font.size * 0.5, 2.0);
    }

    fn draw_ascii(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.combo;
        let (x, y) = self.position;
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size * 0.5);

        let mut text = format!("COMBO: {:03}", self.combo);
        if layout.show_progress {
            text.push(' ');
            text.push_str(&ascii_gauge(self.timer_fraction, ASCII_CELLS));
        }
        if layout.show_multiplier {
            text.push_str(&format!(" x{}", self.multiplier()));
        }

        clear_glow(surface);
        surface.set_fill(self.tier_color());
        surface.fill_text(&text, x, y, &font, TextAlign::Right);
        self.draw_tier_name(surface, x, y + font.size * 1.3);
    }

    /// Chromatic ghost copies behind the main number.
    fn draw_holographic(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let (x, y) = self.position;
        let font = self.combo_font();
        let text = self.combo.to_string();
        let shift = 2.0 + self.pulse.scale();

        clear_glow(surface);
        for (dx, color) in [(-shift, colors::CYAN), (shift, colors::MAGENTA)] {
            surface.set_fill(colors::with_alpha(color, 0.45));
            surface.fill_text(&text, x + dx, y, &font, TextAlign::Right);
        }

        let main = colors::mix(self.tier_color(), self.rainbow.color(), 0.35);
        apply_glow(surface, theme, main);
        surface.set_fill(main);
        surface.fill_text(&text, x, y, &font, TextAlign::Right);

        let label = self.label_font();
        let line = y + label.size * 1.4;
        surface.set_fill(colors::with_alpha(theme.colors.text, 0.85));
        let caption = if theme.layout.combo.show_multiplier {
            format!("COMBO x{}", self.multiplier())
        } else {
            "COMBO".to_string()
        };
        surface.fill_text(&caption, x, line, &label, TextAlign::Right);
        self.draw_tier_name(surface, x, line + label.size * 1.3);
        self.draw_gauge(surface, x, line + label.size * 1.9, 3.0);
    }

    fn draw_break(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let (x, y) = self.position;
        let label = self.label_font();
        surface.set_alpha(self.break_flash.alpha(0.7) * self.fade.value());
        clear_glow(surface);
        surface.set_fill(theme.colors.warning);
        surface.fill_text("BREAK", x, y, &self.combo_font(), TextAlign::Right);
        surface.set_fill(colors::with_alpha(theme.colors.text, 0.7));
        surface.fill_text(
            &format!("{} COMBO", self.broken_at),
            x,
            y + label.size * 1.4,
            &label,
            TextAlign::Right,
        );
    }
}

impl HudWidget for ComboDisplay {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.combo.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.combo;
        self.pulse.tick(dt);
        self.tier_flash.tick(dt);
        self.break_flash.tick(dt);
        self.rainbow.tick(dt, RAINBOW_SPEED);

        let level = self.tiers.level(snapshot.combo);
        if let Some(previous) = self.last_combo {
            if snapshot.combo > previous {
                if level > self.level {
                    self.pulse.kick(layout.pulse_scale);
                    self.tier_flash.arm(TIER_FLASH);
                } else {
                    self.pulse.kick(1.0 + (layout.pulse_scale - 1.0) * 0.4);
                }
                self.break_flash.cancel();
            } else if snapshot.combo < previous && previous >= layout.min_combo {
                self.broken_at = previous;
                self.break_flash.arm(BREAK_FLASH);
            }
        }
        self.last_combo = Some(snapshot.combo);
        self.combo = snapshot.combo;
        self.level = level;

        self.timer_fraction = if layout.timer_max > 0.0 {
            (snapshot.combo_timer / layout.timer_max).clamp(0.0, 1.0)
        } else {
            0.0
        };

        self.fade
            .set_shown(snapshot.combo >= layout.min_combo || self.break_flash.is_active());
        self.fade.tick(dt, layout.fade_speed);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.combo;
        if !layout.visible || !self.fade.is_visible() {
            return;
        }

        surface.save();
        if self.break_flash.is_active() && self.combo < layout.min_combo {
            self.draw_break(surface);
        } else {
            surface.set_alpha(self.fade.value());
            match layout.style {
                ComboStyle::Default => self.draw_default(surface),
                ComboStyle::Line => self.draw_line(surface),
                ComboStyle::Ascii => self.draw_ascii(surface),
                ComboStyle::Holographic => self.draw_holographic(surface),
            }
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.combo = 0;
        self.last_combo = None;
        self.broken_at = 0;
        self.level = 0;
        self.timer_fraction = 0.0;
        self.pulse = Pulse::default();
        self.tier_flash.cancel();
        self.break_flash.cancel();
        self.fade = Fade::default();
    }

    fn position(&self) -> (f32, f32) {
        self.position
    }
}
