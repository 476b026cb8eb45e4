//! Common types and utilities for theme configuration.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// 2D position/size configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vec2Conf {
    pub x: f32,
    pub y: f32,
}

impl Vec2Conf {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color type
pub type Color = [f32; 4];

/// Common color constants and helpers
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
    pub const MAGENTA: Color = [1.0, 0.0, 1.0, 1.0];
    pub const GRAY: Color = [0.5, 0.5, 0.5, 1.0];
    pub const ORANGE: Color = [1.0, 0.55, 0.0, 1.0];

    /// Same color with its alpha multiplied by `alpha`.
    pub fn with_alpha(color: Color, alpha: f32) -> Color {
        [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
    }

    /// Linear blend between two colors, `t` in [0,1].
    pub fn mix(a: Color, b: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
    }

    /// HSL (hue in degrees) to an opaque RGBA color.
    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m, 1.0]
    }
}

/// One screen axis of a layout position.
///
/// Non-negative offsets are measured from the left/top edge, negative ones from the
/// right/bottom edge. In TOML this is either a number or the string `"center"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    Offset(f32),
    Center,
}

impl Anchor {
    pub fn resolve(self, dimension: f32) -> f32 {
        match self {
            Anchor::Offset(offset) if offset >= 0.0 => offset,
            Anchor::Offset(offset) => dimension + offset,
            Anchor::Center => dimension / 2.0,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::Offset(0.0)
    }
}

impl Serialize for Anchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Anchor::Offset(offset) => serializer.serialize_f32(*offset),
            Anchor::Center => serializer.serialize_str("center"),
        }
    }
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnchorVisitor;

        impl Visitor<'_> for AnchorVisitor {
            type Value = Anchor;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a numeric offset or \"center\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Anchor, E> {
                Ok(Anchor::Offset(v as f32))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Anchor, E> {
                Ok(Anchor::Offset(v as f32))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Anchor, E> {
                Ok(Anchor::Offset(v as f32))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Anchor, E> {
                if v.eq_ignore_ascii_case("center") {
                    Ok(Anchor::Center)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(AnchorVisitor)
    }
}

/// Widget anchor point on screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Position {
    #[serde(default)]
    pub x: Anchor,
    #[serde(default)]
    pub y: Anchor,
}

impl Position {
    pub fn new(x: Anchor, y: Anchor) -> Self {
        Self { x, y }
    }

    pub fn resolve(&self, width: f32, height: f32) -> (f32, f32) {
        (self.x.resolve(width), self.y.resolve(height))
    }
}

/// Serde default for `visible` and other opt-out flags.
pub fn default_true() -> bool {
    true
}

/// Declares a style tag enum read from a theme string.
///
/// The first variant is the fallback for tags the enum does not know, so a theme written
/// for a newer build still renders.
macro_rules! style_tag {
    (
        $(#[$meta:meta])*
        $name:ident {
            $default:ident => $default_tag:literal
            $(, $variant:ident => $tag:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
        }

        impl $name {
            pub fn tag(self) -> &'static str {
                match self {
                    Self::$default => $default_tag,
                    $(Self::$variant => $tag,)*
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $default_tag => Self::$default,
                    $($tag => Self::$variant,)*
                    other => {
                        log::debug!(
                            "THEME: unknown {} style '{}', using '{}'",
                            stringify!($name),
                            other,
                            $default_tag
                        );
                        Self::$default
                    }
                }
            }
        }

        impl From<$name> for String {
            fn from(style: $name) -> Self {
                style.tag().to_string()
            }
        }
    };
}

pub(crate) use style_tag;

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_toml(&content).map_err(|e| {
        log::error!("THEME: Failed to parse TOML file {:?}: {}", path, e);
        e
    })
}

/// Deserialize a TOML document held in memory
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        position: Position,
    }

    #[test]
    fn test_anchor_resolution() {
        assert_eq!(Anchor::Offset(20.0).resolve(800.0), 20.0);
        assert_eq!(Anchor::Offset(-40.0).resolve(800.0), 760.0);
        assert_eq!(Anchor::Center.resolve(800.0), 400.0);
    }

    #[test]
    fn test_anchor_from_toml() {
        let w: Wrapper = parse_toml("position = { x = \"center\", y = -30 }").unwrap();
        assert_eq!(w.position.x, Anchor::Center);
        assert_eq!(w.position.y, Anchor::Offset(-30.0));

        let w: Wrapper = parse_toml("position = { x = 12.5 }").unwrap();
        assert_eq!(w.position.x, Anchor::Offset(12.5));
        assert_eq!(w.position.y, Anchor::Offset(0.0));

        assert!(parse_toml::<Wrapper>("position = { x = \"left\" }").is_err());
    }

    #[test]
    fn test_hsl_primaries() {
        let red = colors::hsl(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5 && red[2].abs() < 1e-5);
        let blue = colors::hsl(240.0, 1.0, 0.5);
        assert!(blue[0].abs() < 1e-5 && blue[1].abs() < 1e-5 && (blue[2] - 1.0).abs() < 1e-5);
    }
}
