//! Threshold tiers for combo, kill-streak and slang phrases.
//!
//! A table is sorted by ascending threshold and always starts at threshold 0. Lookup
//! walks from the top down and stops at the first tier the count reaches, so the highest
//! satisfied threshold wins.

use crate::models::theme::Color;
use crate::models::theme::colors;

#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub threshold: u32,
    pub color: Color,
    pub name: String,
}

impl Tier {
    pub fn new(threshold: u32, color: Color, name: &str) -> Self {
        Self {
            threshold,
            color,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Builds a table, sorting it and adding a blank threshold-0 tier when missing.
    pub fn new(mut tiers: Vec<Tier>) -> Self {
        tiers.sort_by_key(|tier| tier.threshold);
        if tiers.first().is_none_or(|tier| tier.threshold != 0) {
            tiers.insert(0, Tier::new(0, colors::WHITE, ""));
        }
        Self { tiers }
    }

    pub fn select(&self, count: u32) -> &Tier {
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.threshold <= count)
            .unwrap_or(&self.tiers[0])
    }

    /// Position of the selected tier, 0 for the fallback tier.
    pub fn level(&self, count: u32) -> usize {
        self.tiers
            .iter()
            .rposition(|tier| tier.threshold <= count)
            .unwrap_or(0)
    }

    pub fn top_level(&self) -> usize {
        self.tiers.len() - 1
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

/// Combo meter tiers
pub fn combo_tiers() -> TierTable {
    TierTable::new(vec![
        Tier::new(0, colors::WHITE, ""),
        Tier::new(3, colors::CYAN, "NICE!"),
        Tier::new(5, colors::GREEN, "COOL!"),
        Tier::new(10, colors::YELLOW, "GREAT!"),
        Tier::new(15, colors::ORANGE, "AWESOME!"),
        Tier::new(25, colors::MAGENTA, "INSANE!"),
        Tier::new(50, colors::RED, "LEGENDARY!"),
    ])
}

/// Kill-streak tiers, keyed by kills inside the streak window
pub fn kill_streak_tiers() -> TierTable {
    TierTable::new(vec![
        Tier::new(0, colors::WHITE, ""),
        Tier::new(2, colors::CYAN, "DOUBLE KILL"),
        Tier::new(3, colors::GREEN, "TRIPLE KILL"),
        Tier::new(5, colors::YELLOW, "MULTI KILL"),
        Tier::new(8, colors::ORANGE, "RAMPAGE"),
        Tier::new(12, colors::MAGENTA, "UNSTOPPABLE"),
        Tier::new(20, colors::RED, "GODLIKE"),
    ])
}

/// Gameplay events that produce a slang phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlangEvent {
    WaveComplete,
    BossDefeated,
    PowerUpCollected,
}

/// Slang tiers for an event, keyed by the combo at the time of the event
pub fn slang_tiers(event: SlangEvent) -> TierTable {
    match event {
        SlangEvent::WaveComplete => TierTable::new(vec![
            Tier::new(0, colors::WHITE, "WAVE CLEAR"),
            Tier::new(5, colors::CYAN, "SMOOTH!"),
            Tier::new(15, colors::YELLOW, "FLAWLESS!"),
            Tier::new(30, colors::MAGENTA, "ABSOLUTE UNIT!"),
        ]),
        SlangEvent::BossDefeated => TierTable::new(vec![
            Tier::new(0, colors::YELLOW, "BOSS DOWN!"),
            Tier::new(10, colors::ORANGE, "WRECKED!"),
            Tier::new(25, colors::RED, "OBLITERATED!"),
        ]),
        SlangEvent::PowerUpCollected => TierTable::new(vec![
            Tier::new(0, colors::GREEN, "POWER UP!"),
            Tier::new(10, colors::CYAN, "JUICED!"),
            Tier::new(20, colors::MAGENTA, "OVERCHARGED!"),
        ]),
    }
}

/// Counts consecutive kills that land within `window` frames of each other.
#[derive(Debug, Clone, Default)]
pub struct StreakCounter {
    count: u32,
    since_last: f32,
}

impl StreakCounter {
    pub fn tick(&mut self, dt: f32, window: f32) {
        if self.count == 0 {
            return;
        }
        self.since_last += dt;
        if self.since_last > window {
            self.count = 0;
            self.since_last = 0.0;
        }
    }

    /// Registers a kill and returns the new streak length.
    pub fn register(&mut self) -> u32 {
        self.count += 1;
        self.since_last = 0.0;
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_threshold_wins() {
        let table = TierTable::new(vec![
            Tier::new(0, colors::WHITE, ""),
            Tier::new(3, colors::WHITE, "NICE!"),
            Tier::new(5, colors::WHITE, "COOL!"),
            Tier::new(10, colors::WHITE, "GREAT!"),
            Tier::new(15, colors::WHITE, "AWESOME!"),
        ]);
        assert_eq!(table.select(13).name, "GREAT!");
        assert_eq!(table.select(13).threshold, 10);
        assert_eq!(table.select(15).name, "AWESOME!");
        assert_eq!(table.select(2).name, "");
        assert_eq!(table.select(10_000).name, "AWESOME!");
    }

    #[test]
    fn test_selection_is_monotonic() {
        for table in [
            combo_tiers(),
            kill_streak_tiers(),
            slang_tiers(SlangEvent::WaveComplete),
            slang_tiers(SlangEvent::BossDefeated),
            slang_tiers(SlangEvent::PowerUpCollected),
        ] {
            let mut previous = 0;
            for count in 0..200 {
                let threshold = table.select(count).threshold;
                assert!(threshold >= previous);
                assert!(threshold <= count);
                previous = threshold;
            }
        }
    }

    #[test]
    fn test_unsorted_table_without_zero_tier() {
        let table = TierTable::new(vec![
            Tier::new(10, colors::RED, "TEN"),
            Tier::new(4, colors::RED, "FOUR"),
        ]);
        assert_eq!(table.tiers()[0].threshold, 0);
        assert_eq!(table.select(3).name, "");
        assert_eq!(table.select(7).name, "FOUR");
        assert_eq!(table.level(11), 2);
        assert_eq!(table.top_level(), 2);
    }

    #[test]
    fn test_streak_window_expires() {
        let mut streak = StreakCounter::default();
        assert_eq!(streak.register(), 1);
        streak.tick(100.0, 120.0);
        assert_eq!(streak.register(), 2);
        for _ in 0..121 {
            streak.tick(1.0, 120.0);
        }
        assert_eq!(streak.count(), 0);
        assert_eq!(streak.register(), 1);
    }
}
