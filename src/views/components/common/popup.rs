//! Floating text elements (score popups, announcements).

use crate::models::theme::{Color, Theme};
use rand::Rng;

/// Popup color, resolved against the theme at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupColor {
    /// The theme's combo color.
    ThemeCombo,
    Fixed(Color),
}

impl PopupColor {
    pub fn resolve(self, theme: &Theme) -> Color {
        match self {
            PopupColor::ThemeCombo => theme.colors.combo,
            PopupColor::Fixed(color) => color,
        }
    }
}

impl From<Color> for PopupColor {
    fn from(color: Color) -> Self {
        PopupColor::Fixed(color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Added to `vy` every frame.
    pub gravity: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    /// Frames over which the element fades out at the end of its life.
    pub fade_window: f32,
    pub color: PopupColor,
    /// Multiplier on the owning widget's font size.
    pub scale: f32,
}

impl FloatingText {
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        lifetime: f32,
        color: impl Into<PopupColor>,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            gravity: 0.0,
            lifetime,
            max_lifetime: lifetime,
            fade_window: 25.0,
            color: color.into(),
            scale: 1.0,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_fade(mut self, fade_window: f32) -> Self {
        self.fade_window = fade_window;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Moves the start point by up to `radius` in each direction.
    pub fn jittered(mut self, radius: f32) -> Self {
        if radius > 0.0 {
            let mut rng = rand::rng();
            self.x += rng.random_range(-radius..=radius);
            self.y += rng.random_range(-radius..=radius);
        }
        self
    }

    pub fn step(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.vy += self.gravity * dt;
        self.lifetime -= dt;
    }

    /// Opaque until the last `fade_window` frames, then linear down to 0.
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            0.0
        } else if self.fade_window <= 0.0 || self.lifetime >= self.fade_window {
            1.0
        } else {
            self.lifetime / self.fade_window
        }
    }

    /// Elapsed share of the lifetime in [0,1].
    pub fn age(&self) -> f32 {
        if self.max_lifetime > 0.0 {
            (1.0 - self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0 && self.alpha() > 0.0
    }
}

/// Elements owned by one widget. Grows only through `push`.
#[derive(Debug, Clone, Default)]
pub struct PopupList {
    items: Vec<FloatingText>,
}

impl PopupList {
    pub fn push(&mut self, item: FloatingText) {
        self.items.push(item);
    }

    /// Moves every element, then drops the expired ones.
    pub fn tick(&mut self, dt: f32) {
        for item in &mut self.items {
            item.step(dt);
        }
        self.items.retain(FloatingText::is_alive);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatingText> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::colors;

    #[test]
    fn test_fade_over_final_window() {
        let mut item = FloatingText::new("+100", 0.0, 0.0, 60.0, colors::WHITE).with_fade(20.0);
        for _ in 0..40 {
            item.step(1.0);
        }
        assert_eq!(item.alpha(), 1.0);
        for _ in 0..10 {
            item.step(1.0);
        }
        assert!((item.alpha() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_gravity_bends_motion() {
        let mut item = FloatingText::new("+1", 0.0, 100.0, 60.0, colors::WHITE)
            .with_velocity(1.0, -2.0)
            .with_gravity(0.5);
        item.step(1.0);
        assert_eq!((item.x, item.y), (1.0, 98.0));
        assert_eq!(item.vy, -1.5);
    }

    #[test]
    fn test_list_never_grows_without_push() {
        let mut list = PopupList::default();
        for i in 0..10 {
            list.push(FloatingText::new("x", 0.0, 0.0, 5.0 + i as f32 * 3.0, colors::WHITE));
        }
        let mut previous = list.len();
        for _ in 0..60 {
            list.tick(1.0);
            assert!(list.len() <= previous);
            previous = list.len();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn test_theme_combo_color_follows_theme() {
        let mut theme = Theme::default();
        theme.colors.combo = colors::MAGENTA;
        assert_eq!(PopupColor::ThemeCombo.resolve(&theme), colors::MAGENTA);
        assert_eq!(PopupColor::from(colors::CYAN).resolve(&theme), colors::CYAN);
    }

    #[test]
    fn test_jitter_stays_in_radius() {
        for _ in 0..50 {
            let item = FloatingText::new("x", 10.0, 10.0, 5.0, colors::WHITE).jittered(4.0);
            assert!((6.0..=14.0).contains(&item.x));
            assert!((6.0..=14.0).contains(&item.y));
        }
    }
}
