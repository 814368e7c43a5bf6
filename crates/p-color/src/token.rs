//! Color tokens — hex color strings as they travel through palettes,
//! storage snapshots, and CSS custom properties.
//!
//! A token is deliberately *not* validated on construction. Palette edits
//! accept whatever the caller typed, and malformed values only surface when
//! the contrast math tries to decode them. Keeping the raw string also means
//! a snapshot round-trips byte for byte.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ColorError;
use crate::color::Rgb;

/// A hex color string, normally `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    /// Wrap a raw string without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The fallback substituted for unresolved or unreadable colors.
    #[must_use]
    pub fn black() -> Self {
        Self::new("#000000")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into 8-bit sRGB.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if the token is not a
    /// six-digit hex color.
    pub fn rgb(&self) -> Result<Rgb, ColorError> {
        Rgb::from_hex(&self.0)
    }

    /// Whether the token decodes as a six-digit hex color.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.rgb().is_ok()
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColorToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Rgb> for ColorToken {
    fn from(rgb: Rgb) -> Self {
        Self(rgb.to_hex())
    }
}

impl AsRef<str> for ColorToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_tokens_are_kept_verbatim() {
        let token = ColorToken::new("chartreuse");
        assert_eq!(token.as_str(), "chartreuse");
        assert!(!token.is_valid());
        assert!(token.rgb().is_err());
    }

    #[test]
    fn decodes_valid_token() {
        let token = ColorToken::from("#1E3A8A");
        assert_eq!(token.rgb(), Ok(Rgb::new(30, 58, 138)));
    }

    #[test]
    fn from_rgb_uses_uppercase_hex() {
        assert_eq!(ColorToken::from(Rgb::new(0, 212, 255)).as_str(), "#00D4FF");
    }

    #[test]
    fn black_fallback() {
        assert_eq!(ColorToken::black().rgb(), Ok(Rgb::BLACK));
    }
}
