//! Theme-driven arcade HUD.
//!
//! The game loop owns a [`HudComposer`](views::HudComposer), pushes a
//! [`GameSnapshot`](shared::snapshot::GameSnapshot) and the screen size into it every
//! frame and asks it to draw onto any [`Surface`](render::Surface). Widgets take their
//! colors, fonts, layout and style variant from a [`Theme`](models::theme::Theme) picked
//! from the [`ThemeRegistry`](models::theme::ThemeRegistry).

pub mod models;
pub mod render;
pub mod shared;
pub mod system;
pub mod views;
