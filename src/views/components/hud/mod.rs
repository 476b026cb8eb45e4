//! HUD widgets.
//!
//! Every widget owns its animation state, reads a shared `Theme` and follows the same
//! cycle: `resize` when the screen changes, `update` once per frame with the latest
//! snapshot, `draw` as a pure read of that state.

pub mod announcer;
pub mod bombs;
pub mod boss_health;
pub mod combo;
pub mod effects;
pub mod high_score;
pub mod lives;
pub mod multiplier;
pub mod power_ups;
pub mod score;
pub mod wave;

pub use announcer::Announcer;
pub use bombs::BombsDisplay;
pub use boss_health::BossHealthDisplay;
pub use combo::ComboDisplay;
pub use effects::ScreenEffects;
pub use high_score::HighScoreDisplay;
pub use lives::LivesDisplay;
pub use multiplier::MultiplierPopup;
pub use power_ups::PowerUpSlots;
pub use score::ScoreDisplay;
pub use wave::WaveDisplay;

use crate::models::theme::Theme;
use crate::render::surface::Surface;
use crate::shared::snapshot::GameSnapshot;
use std::sync::Arc;

pub trait HudWidget {
    /// Swaps the theme and re-applies the layout to the last known screen size.
    fn set_theme(&mut self, theme: Arc<Theme>);

    /// Recomputes the screen position. Safe to call at any time, any number of times.
    fn resize(&mut self, width: f32, height: f32);

    /// Advances animation state by `dt` frames.
    fn update(&mut self, snapshot: &GameSnapshot, dt: f32);

    fn draw(&self, surface: &mut dyn Surface);

    /// Drops all transient state and pending timers, e.g. on a new game.
    fn reset(&mut self);

    /// Resolved anchor point in screen units.
    fn position(&self) -> (f32, f32);
}

/// Approximate advance of a monospace glyph, used to line up text runs.
pub(crate) const GLYPH_WIDTH: f32 = 0.6;
