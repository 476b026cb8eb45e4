//! Kill-streak and slang call-outs.
//!
//! Kills are counted inside a sliding window and announced each time the streak climbs a
//! tier. Slang phrases react to gameplay events, picked from a table keyed by the combo at
//! the time, and are rate limited by a cooldown. Announcements raised on the same frame
//! start one after another, `stagger` frames apart.

use super::HudWidget;
use crate::models::theme::hud::AnnouncerStyle;
use crate::models::theme::{Color, Theme, colors};
use crate::models::tiers::{SlangEvent, StreakCounter, TierTable, kill_streak_tiers, slang_tiers};
use crate::render::surface::{FontSpec, Surface, TextAlign};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::common::popup::{FloatingText, PopupList};
use crate::views::components::common::primitives::{apply_glow, clear_glow};
use std::collections::VecDeque;
use std::sync::Arc;

const OUTLINE_WIDTH: f32 = 1.5;

#[derive(Debug, Clone)]
struct Announcement {
    text: String,
    color: Color,
}

pub struct Announcer {
    theme: Arc<Theme>,
    screen: (f32, f32),
    position: (f32, f32),
    popups: PopupList,
    kill_tiers: TierTable,
    streak: StreakCounter,
    announced_level: usize,
    slang_cooldown: f32,
    queue: VecDeque<Announcement>,
    /// Frames until the next queued announcement may start.
    gate: f32,
}

impl Announcer {
    pub fn new(theme: Arc<Theme>) -> Self {
        Self {
            theme,
            screen: (0.0, 0.0),
            position: (0.0, 0.0),
            popups: PopupList::default(),
            kill_tiers: kill_streak_tiers(),
            streak: StreakCounter::default(),
            announced_level: 0,
            slang_cooldown: 0.0,
            queue: VecDeque::new(),
            gate: 0.0,
        }
    }

    /// Counts a kill. Returns the phrase when the streak reached a new tier.
    pub fn register_kill(&mut self) -> Option<String> {
        let count = self.streak.register();
        let level = self.kill_tiers.level(count);
        if level <= self.announced_level {
            return None;
        }
        self.announced_level = level;
        let tier = self.kill_tiers.select(count);
        let text = tier.name.clone();
        let color = tier.color;
        log::debug!("HUD: kill streak {} -> {}", count, text);
        self.announce(text.clone(), color);
        Some(text)
    }

    /// Slang for a gameplay event. Returns the phrase unless the cooldown is still running.
    pub fn slang(&mut self, event: SlangEvent, combo: u32) -> Option<String> {
        if self.slang_cooldown > 0.0 {
            return None;
        }
        let tiers = slang_tiers(event);
        let tier = tiers.select(combo);
        self.slang_cooldown = self.theme.layout.announcer.slang_cooldown;
        self.announce(tier.name.clone(), tier.color);
        Some(tier.name.clone())
    }

    pub fn streak(&self) -> u32 {
        self.streak.count()
    }

    pub fn popups(&self) -> &PopupList {
        &self.popups
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn announce(&mut self, text: String, color: Color) {
        self.queue.push_back(Announcement { text, color });
        self.start_queued();
    }

    fn start_queued(&mut self) {
        while self.gate <= 0.0 {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            let layout = &self.theme.layout.announcer;
            let (x, y) = self.position;
            self.popups.push(
                FloatingText::new(next.text, x, y, layout.lifetime, next.color)
                    .with_velocity(0.0, -layout.rise_speed)
                    .with_fade(layout.fade_window),
            );
            self.gate = layout.stagger;
        }
    }

    fn draw_popup(&self, surface: &mut dyn Surface, popup: &FloatingText) {
        let theme = &self.theme;
        // Slight pop on entry.
        let grow = 1.0 + (1.0 - (popup.age() * 6.0).min(1.0)) * 0.25;
        let size = theme.layout.announcer.font_size * popup.scale * grow;
        let font = FontSpec::new(&theme.fonts.title, size);
        let color = popup.color.resolve(theme);

        surface.save();
        surface.set_alpha(popup.alpha());
        match theme.layout.announcer.style {
            AnnouncerStyle::Default => {
                apply_glow(surface, theme, color);
            }
            AnnouncerStyle::Outline => {
                clear_glow(surface);
                surface.set_fill(colors::with_alpha(colors::BLACK, 0.85));
                for (dx, dy) in [
                    (-OUTLINE_WIDTH, 0.0),
                    (OUTLINE_WIDTH, 0.0),
                    (0.0, -OUTLINE_WIDTH),
                    (0.0, OUTLINE_WIDTH),
                ] {
                    surface.fill_text(
                        &popup.text,
                        popup.x + dx,
                        popup.y + dy,
                        &font,
                        TextAlign::Center,
                    );
                }
            }
        }
        surface.set_fill(color);
        surface.fill_text(&popup.text, popup.x, popup.y, &font, TextAlign::Center);
        surface.restore();
    }
}

impl HudWidget for Announcer {
    fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
        self.resize(self.screen.0, self.screen.1);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.position = self.theme.layout.announcer.position.resolve(width, height);
    }

    fn update(&mut self, _snapshot: &GameSnapshot, dt: f32) {
        let layout = &self.theme.layout.announcer;
        self.streak.tick(dt, layout.streak_window);
        if self.streak.count() == 0 {
            self.announced_level = 0;
        }
        self.slang_cooldown = (self.slang_cooldown - dt).max(0.0);
        self.popups.tick(dt);

        self.gate -= dt;
        self.start_queued();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.theme.layout.announcer.visible {
            return;
        }
        for popup in self.popups.iter() {
            self.draw_popup(surface, popup);
        }
    }

    fn reset(&mut self) {
        self.popups.clear();
        self.streak.reset();
        self.announced_level = 0;
        self.slang_cooldown = 0.0;
        self.queue.clear();
        self.gate = 0.0;
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

    fn idle(announcer: &mut Announcer, frames: usize) {
        for _ in 0..frames {
            announcer.update(&GameSnapshot::default(), 1.0);
        }
    }

    #[test]
    fn test_streak_announces_each_new_tier_once() {
        let mut announcer = Announcer::new(ThemeRegistry::builtin().get("neon"));
        let phrases: Vec<Option<String>> = (0..5)
            .map(|_| {
                let phrase = announcer.register_kill();
                idle(&mut announcer, 10);
                phrase
            })
            .collect();
        assert_eq!(
            phrases,
            vec![
                None,
                Some("DOUBLE KILL".to_string()),
                Some("TRIPLE KILL".to_string()),
                None,
                Some("MULTI KILL".to_string()),
            ]
        );
    }

    #[test]
    fn test_streak_expires_after_window() {
        let mut announcer = Announcer::new(ThemeRegistry::builtin().get("neon"));
        announcer.register_kill();
        announcer.register_kill();
        let window = announcer.theme.layout.announcer.streak_window as usize;
        idle(&mut announcer, window + 1);
        assert_eq!(announcer.streak(), 0);

        assert_eq!(announcer.register_kill(), None);
        assert_eq!(announcer.register_kill(), Some("DOUBLE KILL".to_string()));
    }

    #[test]
    fn test_slang_respects_cooldown_and_combo() {
        let mut announcer = Announcer::new(ThemeRegistry::builtin().get("neon"));
        assert_eq!(
            announcer.slang(SlangEvent::WaveComplete, 16),
            Some("FLAWLESS!".to_string())
        );
        assert_eq!(announcer.slang(SlangEvent::BossDefeated, 0), None);

        let cooldown = announcer.theme.layout.announcer.slang_cooldown as usize;
        idle(&mut announcer, cooldown);
        assert_eq!(
            announcer.slang(SlangEvent::BossDefeated, 0),
            Some("BOSS DOWN!".to_string())
        );
    }

    #[test]
    fn test_same_frame_announcements_are_staggered() {
        let mut announcer = Announcer::new(ThemeRegistry::builtin().get("neon"));
        announcer.slang(SlangEvent::PowerUpCollected, 0);
        announcer.register_kill();
        announcer.register_kill();
        assert_eq!(announcer.popups().len(), 1);
        assert_eq!(announcer.queued(), 1);

        let stagger = announcer.theme.layout.announcer.stagger as usize;
        idle(&mut announcer, stagger);
        assert_eq!(announcer.popups().len(), 2);
        assert_eq!(announcer.queued(), 0);

        let mut list = CommandList::new();
        announcer.draw(&mut list);
        let texts = list.texts();
        assert!(texts.contains(&"POWER UP!"));
        assert!(texts.contains(&"DOUBLE KILL"));
    }

    #[test]
    fn test_outline_style_draws_shadow_copies() {
        let mut announcer = Announcer::new(ThemeRegistry::builtin().get("holo"));
        announcer.slang(SlangEvent::BossDefeated, 30);
        let mut list = CommandList::new();
        announcer.draw(&mut list);
        assert_eq!(list.texts(), vec!["OBLITERATED!"; 5]);
    }

    #[test]
    fn test_live_announcement_sized_by_current_theme() {
        let registry = ThemeRegistry::builtin();
        let mut announcer = Announcer::new(registry.get("neon"));
        announcer.resize(1280.0, 720.0);
        announcer.register_kill();
        announcer.register_kill();
        idle(&mut announcer, 1);

        let mut big = (*registry.get("neon")).clone();
        big.id = "big".to_string();
        big.layout.announcer.font_size = 48.0;
        announcer.set_theme(Arc::new(big));

        let mut list = CommandList::new();
        announcer.draw(&mut list);
        let sizes: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { font, .. } => Some(font.size),
                _ => None,
            })
            .collect();
        assert!(!sizes.is_empty());
        assert!(sizes.iter().all(|size| *size >= 48.0), "{:?}", sizes);
    }
}
