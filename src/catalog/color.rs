//! Hex colours used for team styling
//!
//! Colours are opaque to the quest logic; they are read from the catalog,
//! checked to be well-formed, and handed to the presentation layer as
//! `#rrggbb` strings.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// An RGB colour written as `#RGB` or `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

/// Error returned when a colour string is not a hex colour
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a `#RGB` or `#RRGGBB` colour")]
pub struct ParseColorError(String);

impl Color {
    /// Carnelian red, the event's branding colour
    pub const BRAND: Self = Self::rgb(0xB3, 0x1B, 0x1B);
    /// Plain white
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    /// Plain black
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    /// Creates a colour from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Display for Color {
    /// Formats the colour as lowercase `#rrggbb`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseColorError(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(error)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| error());

        match digits.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(error()),
        }
    }
}

impl Serialize for Color {
    /// Serializes the colour as a `#rrggbb` string
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    /// Deserializes a colour from a hex string
    fn deserialize<D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!("#1976d2".parse::<Color>(), Ok(Color::rgb(0x19, 0x76, 0xd2)));
        assert_eq!("#B31B1B".parse::<Color>(), Ok(Color::BRAND));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!("#fff".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("#000".parse::<Color>(), Ok(Color::BLACK));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in ["", "fff", "#ff", "#ffff", "#gggggg", "#1976d2ff", "#+1+1+1"] {
            assert!(s.parse::<Color>().is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn test_display_is_lowercase_long_form() {
        assert_eq!(Color::BRAND.to_string(), "#b31b1b");
        assert_eq!("#FFF".parse::<Color>().unwrap().to_string(), "#ffffff");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::BRAND).unwrap();
        assert_eq!(json, "\"#b31b1b\"");
        let back: Color = serde_json::from_str("\"#fbc02d\"").unwrap();
        assert_eq!(back, Color::rgb(0xfb, 0xc0, 0x2d));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
