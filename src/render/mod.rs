//! Drawing backends for the HUD.

pub mod commands;
pub mod surface;

pub use commands::{CommandList, DrawCommand};
pub use surface::{FontSpec, Surface, TextAlign};
