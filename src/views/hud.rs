//! HUD composer: the single integration point for the game loop.
//!
//! Owns one instance of every widget, fans `resize`/`update`/`draw` out to them and turns
//! gameplay events into widget triggers. Theme switches replace the shared descriptor in
//! every widget at once.

use crate::models::theme::Theme;
use crate::models::tiers::SlangEvent;
use crate::render::surface::Surface;
use crate::shared::presentation::{HudField, PresentationSink};
use crate::shared::snapshot::GameSnapshot;
use crate::views::components::hud::{
    Announcer, BombsDisplay, BossHealthDisplay, ComboDisplay, HighScoreDisplay, HudWidget,
    LivesDisplay, MultiplierPopup, PowerUpSlots, ScoreDisplay, ScreenEffects, WaveDisplay,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct HudComposer {
    theme: Arc<Theme>,
    screen: (f32, f32),

    boss: BossHealthDisplay,
    power_ups: PowerUpSlots,
    score: ScoreDisplay,
    high_score: HighScoreDisplay,
    lives: LivesDisplay,
    bombs: BombsDisplay,
    wave: WaveDisplay,
    combo: ComboDisplay,
    multiplier: MultiplierPopup,
    announcer: Announcer,
    effects: ScreenEffects,

    /// Combo from the latest snapshot, keys the slang tables.
    last_combo: u32,

    presentation: Option<Box<dyn PresentationSink>>,
    presented: HashMap<HudField, String>,
}

impl HudComposer {
    pub fn new(theme: Arc<Theme>) -> Self {
        log::info!("HUD: Composer created with theme '{}'", theme.id);
        Self {
            boss: BossHealthDisplay::new(Arc::clone(&theme)),
            power_ups: PowerUpSlots::new(Arc::clone(&theme)),
            score: ScoreDisplay::new(Arc::clone(&theme)),
            high_score: HighScoreDisplay::new(Arc::clone(&theme)),
            lives: LivesDisplay::new(Arc::clone(&theme)),
            bombs: BombsDisplay::new(Arc::clone(&theme)),
            wave: WaveDisplay::new(Arc::clone(&theme)),
            combo: ComboDisplay::new(Arc::clone(&theme)),
            multiplier: MultiplierPopup::new(Arc::clone(&theme)),
            announcer: Announcer::new(Arc::clone(&theme)),
            effects: ScreenEffects::new(Arc::clone(&theme)),
            theme,
            screen: (0.0, 0.0),
            last_combo: 0,
            presentation: None,
            presented: HashMap::new(),
        }
    }

    /// Widgets in draw order, back to front.
    fn widgets(&self) -> [&dyn HudWidget; 11] {
        [
            &self.boss,
            &self.power_ups,
            &self.score,
            &self.high_score,
            &self.lives,
            &self.bombs,
            &self.wave,
            &self.combo,
            &self.multiplier,
            &self.announcer,
            &self.effects,
        ]
    }

    fn widgets_mut(&mut self) -> [&mut dyn HudWidget; 11] {
        [
            &mut self.boss,
            &mut self.power_ups,
            &mut self.score,
            &mut self.high_score,
            &mut self.lives,
            &mut self.bombs,
            &mut self.wave,
            &mut self.combo,
            &mut self.multiplier,
            &mut self.announcer,
            &mut self.effects,
        ]
    }

    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Swaps the descriptor for every widget. Animation state carries over.
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        if Arc::ptr_eq(&self.theme, &theme) {
            return;
        }
        log::info!("HUD: Switching theme '{}' -> '{}'", self.theme.id, theme.id);
        for widget in self.widgets_mut() {
            widget.set_theme(Arc::clone(&theme));
        }
        self.theme = theme;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        for widget in self.widgets_mut() {
            widget.resize(width, height);
        }
    }

    pub fn screen(&self) -> (f32, f32) {
        self.screen
    }

    pub fn update(&mut self, snapshot: &GameSnapshot, dt: f32) {
        self.last_combo = snapshot.combo;
        for widget in self.widgets_mut() {
            widget.update(snapshot, dt);
        }
        self.present(snapshot);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for widget in self.widgets() {
            widget.draw(surface);
        }
    }

    /// Clears every widget for a new run.
    pub fn reset(&mut self) {
        for widget in self.widgets_mut() {
            widget.reset();
        }
        self.last_combo = 0;
        self.presented.clear();
    }

    // --- Gameplay triggers ---

    /// "+points" popup at a playfield position, colored and sized by the current combo tier.
    pub fn score_popup(&mut self, points: u64, x: f32, y: f32) {
        let color = self.combo.popup_color();
        let tier = self.combo.level();
        self.score.spawn_popup(points, x, y, color, tier);
    }

    pub fn multiplier_popup(&mut self, multiplier: u32) {
        self.multiplier.trigger(multiplier);
    }

    pub fn show_boss(&mut self, name: &str) {
        log::debug!("HUD: Boss '{}' incoming", name);
        self.boss.show(name);
    }

    pub fn hide_boss(&mut self) {
        self.boss.hide();
    }

    pub fn wave_complete(&mut self) -> Option<String> {
        self.announcer.slang(SlangEvent::WaveComplete, self.last_combo)
    }

    /// Slang call-out, and the health bar starts fading away.
    pub fn boss_defeated(&mut self) -> Option<String> {
        self.boss.hide();
        self.announcer.slang(SlangEvent::BossDefeated, self.last_combo)
    }

    pub fn power_up_collected(&mut self) -> Option<String> {
        self.announcer
            .slang(SlangEvent::PowerUpCollected, self.last_combo)
    }

    pub fn register_kill(&mut self) -> Option<String> {
        self.announcer.register_kill()
    }

    // --- Settings ---

    pub fn set_crt_effects(&mut self, enabled: bool) {
        self.effects.set_enabled(enabled);
    }

    pub fn set_presentation_sink(&mut self, sink: Box<dyn PresentationSink>) {
        self.presentation = Some(sink);
        self.presented.clear();
    }

    pub fn clear_presentation_sink(&mut self) {
        self.presentation = None;
    }

    /// Pushes the fields whose text changed since the last push.
    fn present(&mut self, snapshot: &GameSnapshot) {
        let Some(sink) = self.presentation.as_mut() else {
            return;
        };
        let boss = snapshot
            .boss
            .as_ref()
            .map(|boss| format!("{} {}%", boss.name, (boss.fraction() * 100.0).round()))
            .unwrap_or_default();
        let fields = [
            (HudField::Score, snapshot.score.to_string()),
            (HudField::HighScore, snapshot.high_score.max(snapshot.score).to_string()),
            (HudField::Lives, snapshot.lives.to_string()),
            (HudField::Bombs, snapshot.bombs.to_string()),
            (HudField::Wave, snapshot.wave.to_string()),
            (HudField::Combo, snapshot.combo.to_string()),
            (HudField::Boss, boss),
        ];
        for (field, text) in fields {
            if self.presented.get(&field) != Some(&text) {
                sink.present(field, &text);
                self.presented.insert(field, text);
            }
        }
    }

    // --- Accessors ---

    pub fn score(&self) -> &ScoreDisplay {
        &self.score
    }

    pub fn high_score(&self) -> &HighScoreDisplay {
        &self.high_score
    }

    pub fn lives(&self) -> &LivesDisplay {
        &self.lives
    }

    pub fn bombs(&self) -> &BombsDisplay {
        &self.bombs
    }

    pub fn wave(&self) -> &WaveDisplay {
        &self.wave
    }

    pub fn combo(&self) -> &ComboDisplay {
        &self.combo
    }

    pub fn boss(&self) -> &BossHealthDisplay {
        &self.boss
    }

    pub fn power_ups(&self) -> &PowerUpSlots {
        &self.power_ups
    }

    pub fn multiplier(&self) -> &MultiplierPopup {
        &self.multiplier
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn effects(&self) -> &ScreenEffects {
        &self.effects
    }

    /// Resolved positions of every widget, in draw order.
    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.widgets().iter().map(|widget| widget.position()).collect()
    }
}
