//! Everything drawn on top of the playfield.

pub mod components;
pub mod hud;
pub mod settings;

pub use hud::HudComposer;
pub use settings::{OptionsOverlay, OverlayCommand, OverlayEvent};
