//! Channels between the HUD thread and its collaborators.
//!
//! Audio is fire-and-forget: the HUD and the options overlay emit `AudioCommand`s and never
//! wait for them. The presentation channel carries the optional text mirror of the HUD.

use crate::shared::presentation::PresentationUpdate;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, unbounded};

/// Requests for the audio collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Play a named sound effect.
    Play { sample: String },
    /// Stop the music track.
    Stop,
    /// Music volume in [0,1].
    SetMusicVolume { volume: f32 },
    /// Effects volume in [0,1].
    SetSfxVolume { volume: f32 },
}

/// Anything that accepts audio requests. Sending never fails from the caller's side.
pub trait AudioSink {
    fn send_audio(&self, command: AudioCommand);
}

impl AudioSink for Sender<AudioCommand> {
    fn send_audio(&self, command: AudioCommand) {
        match self.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                log::warn!("AUDIO: Queue full, dropping {:?}", command)
            }
            Err(TrySendError::Disconnected(command)) => {
                log::debug!("AUDIO: No listener for {:?}", command)
            }
        }
    }
}

/// Audio sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn send_audio(&self, _command: AudioCommand) {}
}

/// Aggregates the channels the HUD talks through.
#[derive(Clone)]
pub struct HudBus {
    /// HUD → Audio: sound and volume requests.
    pub audio_tx: Sender<AudioCommand>,
    pub audio_rx: Receiver<AudioCommand>,

    /// HUD → Presentation: text mirror of changed fields.
    pub presentation_tx: Sender<PresentationUpdate>,
    pub presentation_rx: Receiver<PresentationUpdate>,
}

impl HudBus {
    pub fn new() -> Self {
        let (audio_tx, audio_rx) = unbounded();

        // Bounded: a slow reader loses stale text instead of growing the queue.
        let (presentation_tx, presentation_rx) = bounded(64);

        Self {
            audio_tx,
            audio_rx,
            presentation_tx,
            presentation_rx,
        }
    }
}

impl Default for HudBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_commands_reach_receiver() {
        let bus = HudBus::new();
        bus.audio_tx.send_audio(AudioCommand::SetSfxVolume { volume: 0.4 });
        bus.audio_tx.send_audio(AudioCommand::Stop);
        let received: Vec<_> = bus.audio_rx.try_iter().collect();
        assert_eq!(
            received,
            vec![AudioCommand::SetSfxVolume { volume: 0.4 }, AudioCommand::Stop]
        );
    }

    #[test]
    fn test_send_without_listener_is_silent() {
        let (tx, rx) = unbounded::<AudioCommand>();
        drop(rx);
        tx.send_audio(AudioCommand::Play {
            sample: "menu_move".to_string(),
        });
    }
}
