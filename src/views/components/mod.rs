pub mod common;
pub mod hud;

pub use hud::{
    Announcer, BombsDisplay, BossHealthDisplay, ComboDisplay, HighScoreDisplay, HudWidget,
    LivesDisplay, MultiplierPopup, PowerUpSlots, ScoreDisplay, ScreenEffects, WaveDisplay,
};
