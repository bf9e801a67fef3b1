//! Core theme types.
//!
//! This module defines the fundamental types for the theme system:
//! - `Color` - 24-bit RGB color, written as `#RRGGBB`
//! - `Hsl` - hue/saturation/lightness triple used by the contrast search
//! - `Palette` - an ordered list of colors treated as one design unit
//! - `Mode` - whether a palette overrides the whole surface or only accents
//! - `ColorScheme` - the light/dark hint derived from the background

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A color string that is not a 6-digit hex value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color \"{value}\" (expected #RRGGBB hex)")]
pub struct InvalidColor {
    pub value: String,
}

/// RGB color representation.
///
/// Each component is a value from 0-255. The canonical text form is an
/// uppercase `#RRGGBB` string, which is also how the color is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a new color from RGB components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#ffffff" or "FFFFFF").
    ///
    /// Surrounding whitespace and a single leading `#` are accepted; the
    /// digits themselves are case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor {
            value: hex.to_string(),
        };

        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Convert to hex string (e.g., "#FFFFFF").
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(128, 128, 128)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// An ordered sequence of colors.
///
/// Order matters: the index of a color is the stable key for its
/// per-slot variables (`--palette-1`, `--palette-2`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub id: Option<String>,
    pub name: Option<String>,
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            id: None,
            name: None,
            colors,
        }
    }

    /// Validate a list of hex strings, failing on the first malformed entry.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, InvalidColor> {
        let colors = colors
            .iter()
            .map(|c| Color::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    pub fn with_identity(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }
}

/// How much of the surface a palette takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Background, foreground, surface, border, muted and color scheme too.
    Full,
    /// Accent and per-swatch variables only.
    #[default]
    Accent,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Accent => "accent",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Mode::Full => Mode::Accent,
            Mode::Accent => Mode::Full,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Mode::Full),
            "accent" => Ok(Mode::Accent),
            other => Err(format!("unknown mode '{}' (expected full or accent)", other)),
        }
    }
}

/// Light/dark hint for the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_accepts_case_and_prefix_variants() {
        let expected = Color::new(0x1a, 0x2b, 0x3c);
        assert_eq!(Color::from_hex("#1a2b3c"), Ok(expected));
        assert_eq!(Color::from_hex("#1A2B3C"), Ok(expected));
        assert_eq!(Color::from_hex("1a2b3c"), Ok(expected));
        assert_eq!(Color::from_hex("  #1a2b3c  "), Ok(expected));
    }

    #[test]
    fn test_from_hex_rejects_malformed_input() {
        for bad in ["#gggggg", "#12345", "#1234567", "", "#", "#abc", "not-a-color", "##123456"] {
            let err = Color::from_hex(bad).unwrap_err();
            assert_eq!(err.value, bad);
        }
    }

    #[test]
    fn test_from_hex_rejects_multibyte_input() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex_is_uppercase() {
        assert_eq!(Color::new(0xab, 0xcd, 0xef).to_hex(), "#ABCDEF");
        assert_eq!(Color::from_hex("#ff6b6b").unwrap().to_string(), "#FF6B6B");
    }

    #[test]
    fn test_color_serde_uses_hex_string() {
        let color = Color::new(255, 107, 107);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#FF6B6B\"");
        let back: Color = serde_json::from_str("\"#ff6b6b\"").unwrap();
        assert_eq!(back, color);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_palette_parse_stops_at_first_invalid() {
        let err = Palette::parse(&["#FFFFFF", "oops", "#zzzzzz"]).unwrap_err();
        assert_eq!(err.value, "oops");

        let palette = Palette::parse(&["#ffffff", "#000000"]).unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#FFFFFF", "#000000"]);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("full".parse::<Mode>(), Ok(Mode::Full));
        assert_eq!(" ACCENT ".parse::<Mode>(), Ok(Mode::Accent));
        assert!("dark".parse::<Mode>().is_err());
        assert_eq!(Mode::default(), Mode::Accent);
        assert_eq!(Mode::Full.toggle(), Mode::Accent);
    }
}
