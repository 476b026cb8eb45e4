//! Data shared between the simulation and the HUD.

pub mod presentation;
pub mod snapshot;
