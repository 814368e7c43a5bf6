//! Symbolic color paths — `primary.900`, `accent.cyan`, `semantic.error`.
//!
//! A [`ColorPath`] names exactly one token slot of a [`ThemePalette`]. The
//! set is closed: parsing rejects anything that is not a real slot, so a
//! path that parsed can always be resolved against a palette.
//!
//! Each path has two textual forms:
//!
//! | Form          | Example                        | Used by                     |
//! |---------------|--------------------------------|-----------------------------|
//! | dotted        | `primary.900`                  | palette lookups, the CLI    |
//! | CSS property  | `--color-primary-900`          | style-root projection       |
//!
//! [`ThemePalette`]: crate::palette::ThemePalette

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ThemeError;
use crate::scale::Step;

/// Prefix shared by every color custom property.
pub const COLOR_PROPERTY_PREFIX: &str = "--color-";

// ---------------------------------------------------------------------------
// Accent / Semantic keys
// ---------------------------------------------------------------------------

/// The four accent slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Cyan,
    Purple,
    Green,
    Orange,
}

impl Accent {
    pub const ALL: [Self; 4] = [Self::Cyan, Self::Purple, Self::Green, Self::Orange];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }
}

/// The four semantic (UI state) slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semantic {
    Success,
    Warning,
    Error,
    Info,
}

impl Semantic {
    pub const ALL: [Self; 4] = [Self::Success, Self::Warning, Self::Error, Self::Info];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

// ---------------------------------------------------------------------------
// ColorPath
// ---------------------------------------------------------------------------

/// One token slot of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorPath {
    Primary(Step),
    Accent(Accent),
    Neutral(Step),
    Semantic(Semantic),
}

impl ColorPath {
    /// Every slot, in projection order: primary, accent, neutral, semantic.
    pub fn all() -> impl Iterator<Item = Self> {
        Step::ALL
            .into_iter()
            .map(Self::Primary)
            .chain(Accent::ALL.into_iter().map(Self::Accent))
            .chain(Step::ALL.into_iter().map(Self::Neutral))
            .chain(Semantic::ALL.into_iter().map(Self::Semantic))
    }

    /// The palette group: `primary`, `accent`, `neutral`, or `semantic`.
    #[must_use]
    pub const fn group(self) -> &'static str {
        match self {
            Self::Primary(_) => "primary",
            Self::Accent(_) => "accent",
            Self::Neutral(_) => "neutral",
            Self::Semantic(_) => "semantic",
        }
    }

    /// The key within the group: a step (`900`) or a name (`cyan`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Primary(step) | Self::Neutral(step) => step.as_str(),
            Self::Accent(accent) => accent.as_str(),
            Self::Semantic(semantic) => semantic.as_str(),
        }
    }

    /// CSS custom property name, e.g. `--color-primary-900`.
    #[must_use]
    pub fn css_property(self) -> String {
        format!("{COLOR_PROPERTY_PREFIX}{}-{}", self.group(), self.key())
    }

    /// CSS `var()` reference, e.g. `var(--color-primary-900)`.
    #[must_use]
    pub fn css_var(self) -> String {
        format!("var({})", self.css_property())
    }

    /// Parse a CSS custom property name back into a path.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnknownColorPath`] if `name` is not one of the
    /// palette's color properties.
    pub fn from_css_property(name: &str) -> Result<Self, ThemeError> {
        name.strip_prefix(COLOR_PROPERTY_PREFIX)
            .and_then(|rest| rest.split_once('-'))
            .and_then(|(group, key)| Self::from_parts(group, key))
            .ok_or_else(|| ThemeError::UnknownColorPath(name.to_owned()))
    }

    fn from_parts(group: &str, key: &str) -> Option<Self> {
        match group {
            "primary" => key.parse().ok().map(Self::Primary),
            "neutral" => key.parse().ok().map(Self::Neutral),
            "accent" => Accent::ALL
                .into_iter()
                .find(|a| a.as_str() == key)
                .map(Self::Accent),
            "semantic" => Semantic::ALL
                .into_iter()
                .find(|s| s.as_str() == key)
                .map(Self::Semantic),
            _ => None,
        }
    }
}

impl fmt::Display for ColorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group(), self.key())
    }
}

impl FromStr for ColorPath {
    type Err = ThemeError;

    /// Accepts `group.key` and `group-key`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once(['.', '-'])
            .and_then(|(group, key)| Self::from_parts(group, key))
            .ok_or_else(|| ThemeError::UnknownColorPath(s.to_owned()))
    }
}
