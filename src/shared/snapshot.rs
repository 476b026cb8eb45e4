//! Game state snapshots consumed by the HUD.
//!
//! The simulation produces one snapshot per frame. The HUD only reads it; every bit of
//! animation state lives in the widgets themselves.

use crate::models::theme::Color;

/// Boss currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct BossInfo {
    pub name: String,
    pub health: f32,
    pub max_health: f32,
}

impl BossInfo {
    /// Remaining health in [0,1]. A boss without max health reads as empty.
    pub fn fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Power-up with a running timer.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePowerUp {
    pub name: String,
    /// Short glyph drawn inside the slot.
    pub icon: String,
    pub color: Color,
    /// Frames left.
    pub duration: f32,
    pub max_duration: f32,
}

impl ActivePowerUp {
    /// Remaining time in [0,1].
    pub fn fraction(&self) -> f32 {
        if self.max_duration > 0.0 {
            (self.duration / self.max_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Snapshot of gameplay state for the HUD.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSnapshot {
    pub score: u64,
    pub lives: u32,
    pub bombs: u32,
    pub wave: u32,
    pub combo: u32,
    /// Frames left before the combo drops.
    pub combo_timer: f32,
    pub boss: Option<BossInfo>,
    pub power_ups: Vec<ActivePowerUp>,
    pub high_score: u64,
}
