//! Foundational color type used throughout widget-studio.
//!
//! Colors travel as `#rrggbb` / `#rrggbbaa` hex strings in serialized form
//! (bundle manifests, control values, visual trees) and as normalized RGBA
//! components in memory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`: expected #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

/// RGBA color with alpha channel, components in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.trim().trim_start_matches('#');
        let malformed = || ParseColorError(s.to_string());
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(malformed());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| malformed())
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if hex.len() == 8 { channel(6..8)? } else { 0xff };
        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when the alpha channel is not opaque.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 0xff {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#4f46e5").unwrap();
        assert_eq!(c.to_hex(), "#4f46e5");
        assert_eq!(c.to_rgba8(), (0x4f, 0x46, 0xe5, 0xff));
    }

    #[test]
    fn test_hex_with_alpha() {
        let c = Color::from_hex("10b98180").unwrap();
        assert_eq!(c.to_rgba8().3, 0x80);
        assert_eq!(c.to_hex(), "#10b98180");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let c = Color::from_rgba8(0xff, 0xff, 0xff, 0xff);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#ffffff\"");
        let back: Color = serde_json::from_str("\"#1f2937\"").unwrap();
        assert_eq!(back.to_hex(), "#1f2937");
    }
}
