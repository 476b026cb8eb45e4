//! Optional text mirror of the HUD.
//!
//! Some front ends keep a second, text-only copy of the HUD (accessibility readers,
//! overlay windows, stream widgets). The composer pushes formatted strings to a
//! `PresentationSink` when a field changes; nothing in the HUD depends on one being set.

use crossbeam_channel::{Sender, TrySendError};

/// HUD fields mirrored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudField {
    Score,
    HighScore,
    Lives,
    Bombs,
    Wave,
    Combo,
    Boss,
}

/// One changed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationUpdate {
    pub field: HudField,
    pub text: String,
}

pub trait PresentationSink {
    fn present(&mut self, field: HudField, text: &str);
}

/// Forwards updates to another thread.
///
/// The channel should be bounded; when it is full or closed the update is dropped,
/// since the next change carries the full text again.
pub struct ChannelSink {
    tx: Sender<PresentationUpdate>,
}

impl ChannelSink {
    pub fn new(tx: Sender<PresentationUpdate>) -> Self {
        Self { tx }
    }
}

impl PresentationSink for ChannelSink {
    fn present(&mut self, field: HudField, text: &str) {
        let update = PresentationUpdate {
            field,
            text: text.to_string(),
        };
        match self.tx.try_send(update) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::debug!("HUD: Presentation channel full"),
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("HUD: Presentation receiver dropped")
            }
        }
    }
}

/// Keeps every update in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub updates: Vec<PresentationUpdate>,
}

impl PresentationSink for RecordingSink {
    fn present(&mut self, field: HudField, text: &str) {
        self.updates.push(PresentationUpdate {
            field,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (tx, rx) = bounded(1);
        let mut sink = ChannelSink::new(tx);
        sink.present(HudField::Score, "100");
        sink.present(HudField::Score, "200");

        assert_eq!(rx.try_recv().unwrap().text, "100");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_survives_closed_receiver() {
        let (tx, rx) = bounded(4);
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.present(HudField::Lives, "3");
    }
}
