pub mod anim;
pub mod popup;
pub mod primitives;
