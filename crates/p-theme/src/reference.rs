//! Color references — how validation rules name their colors.
//!
//! A rule's foreground or background is one of:
//!
//! - a literal token: `#0A0E27`
//! - a CSS custom property: `var(--color-primary-900)`
//! - a palette path: `primary.900`
//!
//! Properties and paths are resolved through a [`ColorLookup`], which is
//! either a palette in memory or the live style root. Resolution never
//! fails outright: an unknown reference becomes `#000000` with a warning so
//! one bad rule cannot abort a whole validation pass.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use p_color::ColorToken;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::ThemeError;
use crate::palette::ThemePalette;
use crate::path::ColorPath;

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^var\(\s*(--[A-Za-z0-9_-]+)\s*\)$").expect("var() pattern is a valid regex")
});

// ---------------------------------------------------------------------------
// ColorLookup
// ---------------------------------------------------------------------------

/// Anything that can answer "what is the value of this custom property?".
pub trait ColorLookup {
    /// The current value of `name` (e.g. `--color-primary-900`), if set.
    fn property(&self, name: &str) -> Option<ColorToken>;
}

impl ColorLookup for ThemePalette {
    fn property(&self, name: &str) -> Option<ColorToken> {
        ColorPath::from_css_property(name).ok().map(|path| self.get(path).clone())
    }
}

impl<T: ColorLookup + ?Sized> ColorLookup for &T {
    fn property(&self, name: &str) -> Option<ColorToken> {
        (**self).property(name)
    }
}

// ---------------------------------------------------------------------------
// ColorRef
// ---------------------------------------------------------------------------

/// A color as written in a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorRef {
    /// A concrete token, used as-is.
    Literal(ColorToken),
    /// A custom property name, including the leading `--`.
    Property(String),
    /// A dotted palette path, kept as written until resolution.
    Path(String),
}

impl ColorRef {
    /// Classify a textual reference. Never fails; an unrecognised string
    /// is treated as a literal and will fail color decoding later.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some(caps) = VAR_RE.captures(s) {
            return Self::Property(caps[1].to_owned());
        }
        if !s.starts_with('#') && (s.contains('.') || s.parse::<ColorPath>().is_ok()) {
            return Self::Path(s.to_owned());
        }
        Self::Literal(ColorToken::new(s))
    }

    /// Reference a palette slot through its custom property.
    #[must_use]
    pub fn var(path: ColorPath) -> Self {
        Self::Property(path.css_property())
    }

    /// Resolve to a concrete token.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnresolvedColorReference`] if a property is
    /// unset or empty, or a path does not name a palette slot.
    pub fn try_resolve(&self, lookup: &impl ColorLookup) -> Result<ColorToken, ThemeError> {
        let name = match self {
            Self::Literal(token) => return Ok(token.clone()),
            Self::Property(name) => name.clone(),
            Self::Path(path) => path
                .parse::<ColorPath>()
                .map_err(|_| ThemeError::UnresolvedColorReference(path.clone()))?
                .css_property(),
        };
        lookup
            .property(&name)
            .map(|token| token.as_str().trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(ColorToken::from)
            .ok_or_else(|| ThemeError::UnresolvedColorReference(self.to_string()))
    }

    /// Resolve to a concrete token, substituting `#000000` on failure.
    #[must_use]
    pub fn resolve(&self, lookup: &impl ColorLookup) -> ColorToken {
        self.try_resolve(lookup).unwrap_or_else(|err| {
            warn!(error = %err, "unresolved color reference, using fallback");
            ColorToken::black()
        })
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(token) => write!(f, "{token}"),
            Self::Property(name) => write!(f, "var({name})"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

impl FromStr for ColorRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<ColorPath> for ColorRef {
    fn from(path: ColorPath) -> Self {
        Self::var(path)
    }
}

impl From<&str> for ColorRef {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for ColorRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
