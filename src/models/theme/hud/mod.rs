//! Per-widget layout blocks of a theme.

pub mod announcer;
pub mod bombs;
pub mod boss_health;
pub mod combo;
pub mod high_score;
pub mod lives;
pub mod multiplier;
pub mod options;
pub mod power_ups;
pub mod score;
pub mod wave;

pub use announcer::{AnnouncerLayout, AnnouncerStyle};
pub use bombs::{BombsLayout, BombsStyle};
pub use boss_health::{BossHealthLayout, BossHealthStyle};
pub use combo::{ComboLayout, ComboStyle};
pub use high_score::{HighScoreLayout, HighScoreStyle};
pub use lives::{LivesLayout, LivesStyle};
pub use multiplier::{MultiplierLayout, MultiplierStyle};
pub use options::OptionsLayout;
pub use power_ups::{PowerUpLayout, PowerUpStyle};
pub use score::{ScoreLayout, ScoreStyle};
pub use wave::{WaveLayout, WaveStyle};

use serde::{Deserialize, Serialize};

/// Complete HUD layout of a theme
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HudLayout {
    #[serde(default)]
    pub score: ScoreLayout,

    #[serde(default)]
    pub lives: LivesLayout,

    #[serde(default)]
    pub wave: WaveLayout,

    #[serde(default)]
    pub bombs: BombsLayout,

    #[serde(default)]
    pub combo: ComboLayout,

    #[serde(default)]
    pub boss_health: BossHealthLayout,

    #[serde(default)]
    pub power_ups: PowerUpLayout,

    #[serde(default)]
    pub high_score: HighScoreLayout,

    /// Centered "x4" popup shown on multiplier changes
    #[serde(default)]
    pub multiplier: MultiplierLayout,

    /// Kill-streak and slang phrases
    #[serde(default)]
    pub announcer: AnnouncerLayout,

    #[serde(default)]
    pub options: OptionsLayout,
}
