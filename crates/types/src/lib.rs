use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of colors shown together in a generated palette.
pub const PALETTE_SIZE: usize = 5;

/// Validation failures when constructing a [`Bookmark`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookmarkError {
    /// Name or URL was empty after trimming.
    #[error("please enter both a name and a URL")]
    MissingField,
    /// URL does not start with `http://` or `https://`.
    #[error("invalid URL format: must start with http:// or https://")]
    InvalidScheme,
}

/// A persisted (name, URL) pair.
///
/// Serializes as `{"name": ..., "url": ...}`, the shape the bookmarks file
/// stores. Duplicates are allowed; equality is exact on both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Display name, non-empty and trimmed
    pub name: String,
    /// Target URL, non-empty, trimmed, http(s) only
    pub url: String,
}

impl Bookmark {
    /// Build a bookmark from raw user input, trimming and validating both
    /// fields. This is the only constructor; a `Bookmark` in hand is always
    /// well-formed.
    pub fn new(name: &str, url: &str) -> Result<Self, BookmarkError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(BookmarkError::MissingField);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BookmarkError::InvalidScheme);
        }
        Ok(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    /// Exact match on both fields, the removal criterion.
    pub fn matches(&self, name: &str, url: &str) -> bool {
        self.name == name && self.url == url
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Error returned when a string is not a well-formed hex color.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct ParseHexColorError(pub String);

/// A `#RRGGBB` color with uppercase hex digits.
///
/// The invariant (leading `#`, exactly six digits from `0-9A-F`) is enforced
/// by both constructors, so `as_str` output always matches `^#[0-9A-F]{6}$`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Build a color from raw channel values.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    /// The canonical `#RRGGBB` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the three channels for rendering.
    pub fn rgb(&self) -> (u8, u8, u8) {
        // Infallible: the constructor guarantees six hex digits.
        let digits = &self.0[1..];
        let channel = |range| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ParseHexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ParseHexColorError(s.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseHexColorError(s.to_string()));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParseHexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// A set of [`PALETTE_SIZE`] colors shown together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [HexColor; PALETTE_SIZE],
}

impl Palette {
    pub fn new(colors: [HexColor; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[HexColor; PALETTE_SIZE] {
        &self.colors
    }

    pub fn get(&self, slot: usize) -> Option<&HexColor> {
        self.colors.get(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_trims_and_accepts_http_and_https() {
        let b = Bookmark::new("  GitHub  ", " https://github.com ").unwrap();
        assert_eq!(b.name, "GitHub");
        assert_eq!(b.url, "https://github.com");

        assert!(Bookmark::new("plain", "http://example.com").is_ok());
    }

    #[test]
    fn bookmark_rejects_empty_fields() {
        assert_eq!(Bookmark::new("", "https://x"), Err(BookmarkError::MissingField));
        assert_eq!(Bookmark::new("x", "   "), Err(BookmarkError::MissingField));
    }

    #[test]
    fn bookmark_rejects_non_http_schemes() {
        assert_eq!(Bookmark::new("x", "ftp://x"), Err(BookmarkError::InvalidScheme));
        assert_eq!(Bookmark::new("x", "github.com"), Err(BookmarkError::InvalidScheme));
    }

    #[test]
    fn bookmark_serializes_as_name_url_object() {
        let b = Bookmark::new("GitHub", "https://github.com").unwrap();
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "GitHub", "url": "https://github.com"})
        );
    }

    #[test]
    fn hex_color_format_is_canonical() {
        let c = HexColor::from_rgb(0x48, 0xbb, 0x78);
        assert_eq!(c.as_str(), "#48BB78");
        assert_eq!(c.rgb(), (0x48, 0xBB, 0x78));
    }

    #[test]
    fn hex_color_parse_uppercases_and_validates() {
        let c: HexColor = "#a1b2c3".parse().unwrap();
        assert_eq!(c.as_str(), "#A1B2C3");

        assert!("A1B2C3".parse::<HexColor>().is_err());
        assert!("#A1B2C".parse::<HexColor>().is_err());
        assert!("#A1B2C3D".parse::<HexColor>().is_err());
        assert!("#GGGGGG".parse::<HexColor>().is_err());
    }

    #[test]
    fn hex_color_serde_round_trip() {
        let c: HexColor = "#0F1E2D".parse().unwrap();
        let text = serde_json::to_string(&c).unwrap();
        assert_eq!(text, "\"#0F1E2D\"");
        let back: HexColor = serde_json::from_str(&text).unwrap();
        assert_eq!(back, c);
    }
}
