use std::fmt;

use image::Rgba;
use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Background behind failed cells and the full-panel error view.
    pub const ERROR_BACKGROUND: Color = Color::rgb(0x2a, 0x2a, 0x2a);
    /// Text colour for failure labels.
    pub const FAILURE: Color = Color::rgb(0xff, 0x6b, 0x6b);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
    pub fn parse_hex(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::message(format!(
                "`{value}` is not a #RRGGBB or #RRGGBBAA colour"
            )));
        }

        let channel = |idx: usize| -> Result<u8> {
            u8::from_str_radix(&hex[idx..idx + 2], 16)
                .map_err(|err| AppError::message(format!("invalid colour `{value}`: {err}")))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 0xff },
        })
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::parse_hex("#1a1a1a").unwrap(), Color::rgb(0x1a, 0x1a, 0x1a));
        assert_eq!(Color::parse_hex("FF6B6B").unwrap(), Color::FAILURE);
    }

    #[test]
    fn parses_alpha_channel() {
        let color = Color::parse_hex("#ff6b6b80").unwrap();
        assert_eq!(color.a, 0x80);
        assert_eq!(color.to_string(), "#ff6b6b80");
    }

    #[test]
    fn rejects_malformed_values() {
        for value in ["", "#12345", "#gggggg", "red"] {
            assert!(Color::parse_hex(value).is_err(), "accepted {value:?}");
        }
    }

    #[test]
    fn scales_alpha() {
        assert_eq!(Color::FAILURE.with_alpha(0.7).a, 179);
    }
}
