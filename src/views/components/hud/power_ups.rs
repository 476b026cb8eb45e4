//! Active power-ups with their remaining time.

use super::{GLYPH_WIDTH, HudWidget};
use crate::models::theme::hud::PowerUpStyle;
use crate::models::theme::{Color, Theme, colors};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::{ActivePowerUp, GameSnapshot};
use crate::views::components::common::anim::{Fade, flicker};
use crate::views::components::common::primitives::{apply_glow, clear_glow, draw_bar};
use std::sync::Arc;

const WARN_FREQUENCY: f32 = 0.5;
const FRAMES_PER_SECOND: f32 = 60.0;

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    icon: String,
    color: Color,
    duration: f32,
    fraction: f32,
    appear: Fade,
}

impl Slot {
    fn new(power_up: &ActivePowerUp) -> Self {
        let mut appear = Fade::default();
        appear.show();
        let mut slot = Self {
            name: power_up.name.clone(),
            icon: power_up.icon.clone(),
            color: power_up.color,
            duration: 0.0,
            fraction: 0.0,
            appear,
        };
        slot.refresh(power_up);
        slot
    }

    fn refresh(&mut self, power_up: &ActivePowerUp) {
        self.icon.clone_from(&power_up.icon);
        self.color = power_up.color;
        self.duration = power_up.duration.max(0.0);
        self.fraction = power_up.fraction();
    }

    fn seconds_left(&self) -> u32 {
        (self.duration / FRAMES_PER_SECOND).ceil() as u32
    }
}

pub struct PowerUpSlots {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    slots: Vec<Slot>,
    time: f32,
}

impl PowerUpSlots {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            slots: Vec::new(),
            time: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.name.as_str()).collect()
    }

    /// Opacity of a slot: its fade-in, blinking once the timer runs low.
    fn slot_alpha(&self, slot: &Slot) -> f32 {
        let blink = if slot.fraction < self.theme.layout.power_ups.warn_fraction {
            0.3 + flicker(self.time, WARN_FREQUENCY) * 0.7
        } else {
            1.0
        };
        slot.appear.value() * blink
    }

    fn draw_slots(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.power_ups;
        let (x, y) = self.position;
        let size = layout.slot_size;
        let icon_font = FontSpec::new(&theme.fonts.primary, size * 0.5);

        for (i, slot) in self.slots.iter().enumerate() {
            let sx = x + i as f32 * layout.spacing;
            surface.save();
            surface.set_alpha(self.slot_alpha(slot));

            surface.set_fill(theme.colors.panel_background);
            surface.fill_rect(sx, y, size, size);
            apply_glow(surface, theme, slot.color);
            surface.set_stroke(slot.color, 2.0);
            surface.stroke_rect(sx, y, size, size);

            surface.set_fill(slot.color);
            surface.fill_text(
                &slot.icon,
                sx + size / 2.0,
                y + size * 0.65,
                &icon_font,
                TextAlign::Center,
            );

            clear_glow(surface);
            draw_bar(
                surface,
                sx,
                y + size + 3.0,
                size,
                3.0,
                slot.fraction,
                slot.color,
                colors::with_alpha(theme.colors.text, 0.15),
            );
            surface.restore();
        }
    }

    fn draw_bars(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let layout = &theme.layout.power_ups;
        let (x, y) = self.position;
        let font = FontSpec::new(&theme.fonts.primary, layout.font_size);
        let row = layout.font_size * 2.0;
        let width = layout.slot_size * 3.0;

        clear_glow(surface);
        for (i, slot) in self.slots.iter().enumerate() {
            let ry = y + i as f32 * row;
            surface.save();
            surface.set_alpha(self.slot_alpha(slot));
            surface.set_fill(theme.colors.text);
            surface.fill_text(&slot.name, x, ry, &font, TextAlign::Left);
            draw_bar(
                surface,
                x,
                ry + font.size * 0.3,
                width,
                4.0,
                slot.fraction,
                slot.color,
                colors::with_alpha(theme.colors.text, 0.15),
            );
            surface.restore();
        }
    }

    fn draw_compact(&self, surface: &mut dyn Surface) {
        let theme = &self.theme;
        let (x, y) = self.position;
        let font = FontSpec::new(&theme.fonts.primary, theme.layout.power_ups.font_size);

        clear_glow(surface);
        let mut cursor = x;
        for slot in &self.slots {
            let text = format!("[{}]{}s", slot.icon, slot.seconds_left());
            surface.save();
            surface.set_alpha(self.slot_alpha(slot));
            surface.set_fill(slot.color);
            surface.fill_text(&text, cursor, y, &font, TextAlign::Left);
            surface.restore();
            cursor += (text.chars().count() + 1) as f32 * font.size * GLYPH_WIDTH;
        }
    }
}

impl HudWidget for PowerUpSlots {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.slots.truncate(self.theme.layout.power_ups.max_slots);
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.power_ups.position.resolve(width, height);
    }

    fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.power_ups;
        self.time += dt;

        // Rebuild in snapshot order, keeping the fade of slots already on screen.
        let mut previous = std::mem::take(&mut self.slots);
        for power_up in snapshot
            .power_ups
            .iter()
            .filter(|power_up| power_up.duration > 0.0)
            .take(layout.max_slots)
        {
            let slot = match previous.iter().position(|slot| slot.name == power_up.name) {
                Some(index) => {
                    let mut slot = previous.swap_remove(index);
                    slot.refresh(power_up);
                    slot
                }
                None => Slot::new(power_up),
            };
            self.slots.push(slot);
        }

        for slot in &mut self.slots {
            slot.appear.tick(dt, layout.fade_in);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let layout = &self.theme.layout.power_ups;
        if !layout.visible || self.slots.is_empty() {
            return;
        }

        surface.save();
        match layout.style {
            PowerUpStyle::Slots => self.draw_slots(surface),
            PowerUpStyle::Bars => self.draw_bars(surface),
            PowerUpStyle::Compact => self.draw_compact(surface),
        }
        surface.restore();
    }

    fn reset(&mut self) {
        self.slots.clear();
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

    fn power_up(name: &str, icon: &str, duration: f32) -> ActivePowerUp {
        ActivePowerUp {
            name: name.to_string(),
            icon: icon.to_string(),
            color: colors::CYAN,
            duration,
            max_duration: 600.0,
        }
    }

    fn snapshot(power_ups: Vec<ActivePowerUp>) -> GameSnapshot {
        GameSnapshot {
            power_ups,
            ..Default::default()
        }
    }

    #[test]
    fn test_slots_are_capped() {
        let mut slots = PowerUpSlots::new(ThemeRegistry::builtin().get("neon"));
        let many = (0..7)
            .map(|i| power_up(&format!("P{}", i), "P", 300.0))
            .collect();
        slots.update(&snapshot(many), 1.0);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots.names(), vec!["P0", "P1", "P2", "P3"]);
    }

    #[test]
    fn test_expired_slots_are_removed_and_fade_is_kept() {
        let mut slots = PowerUpSlots::new(ThemeRegistry::builtin().get("neon"));
        let both = vec![power_up("Shield", "S", 300.0), power_up("Magnet", "M", 300.0)];
        for _ in 0..5 {
            slots.update(&snapshot(both.clone()), 1.0);
        }
        let magnet_alpha = slots.slots[1].appear.value();
        assert!(magnet_alpha > 0.0);

        slots.update(&snapshot(vec![power_up("Magnet", "M", 290.0)]), 1.0);
        assert_eq!(slots.names(), vec!["Magnet"]);
        assert!(slots.slots[0].appear.value() > magnet_alpha);

        slots.update(&snapshot(vec![power_up("Magnet", "M", 0.0)]), 1.0);
        assert!(slots.is_empty());
    }

    #[test]
    fn test_styles_render() {
        let registry = ThemeRegistry::builtin();
        let active = vec![power_up("Shield", "S", 125.0), power_up("Magnet", "M", 60.0)];

        let mut compact = PowerUpSlots::new(registry.get("retro"));
        compact.update(&snapshot(active.clone()), 1.0);
        let mut list = CommandList::new();
        compact.draw(&mut list);
        assert_eq!(list.texts(), vec!["[S]3s", "[M]1s"]);

        let mut boxed = PowerUpSlots::new(registry.get("neon"));
        boxed.update(&snapshot(active), 1.0);
        let mut list = CommandList::new();
        boxed.draw(&mut list);
        let outlines = list
            .commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::StrokeRect { .. }))
            .count();
        assert_eq!(outlines, 2);
    }
}
