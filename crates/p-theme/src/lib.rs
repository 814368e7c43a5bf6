//! # p-theme — design tokens and the WCAG contrast engine
//!
//! Defines the theme palette, how its slots are named, how it projects onto
//! CSS custom properties, and how color pairs are judged for legibility.
//!
//! # Architecture
//!
//! ```text
//! scale.rs / path.rs / palette.rs:  the data model (ColorScale, ColorPath, ThemePalette)
//!     │
//!     ▼
//! builtin.rs:    compiled-in palette + stock validation rules
//!     │
//!     ▼
//! css.rs / gradient.rs / typography.rs:
//!                palette → `--color-*` / `--gradient-*` / `--font-*` properties
//!     │
//!     ▼
//! reference.rs:  rule colors (`var(--…)`, `primary.900`, `#hex`) → tokens
//!     │
//!     ▼
//! contrast.rs:   luminance, ratio, AA/AAA ladder (pure)
//!     │
//!     ▼
//! validate.rs:   rule set → ordered verdicts + summary
//! ```
//!
//! [`generate`] sits beside the pipeline: it derives a whole scale from one
//! brand color and reports how each step fares against light and dark
//! backgrounds.
//!
//! Nothing in this crate holds state. The stateful side (current palette,
//! dark/light mode, persistence, projection) lives in `p-sync`.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Contrast math mixes small integer counts with f64 ratios.
#![allow(clippy::cast_precision_loss)]
// Group/key/step names are inherently similar.
#![allow(clippy::similar_names)]

pub mod builtin;
pub mod contrast;
pub mod css;
pub mod generate;
pub mod gradient;
pub mod palette;
pub mod path;
pub mod reference;
pub mod scale;
pub mod typography;
pub mod validate;

pub use contrast::{Level, classify, contrast_ratio, relative_luminance};
pub use palette::{PalettePatch, ThemePalette};
pub use path::ColorPath;
pub use reference::{ColorLookup, ColorRef};
pub use scale::{ColorScale, Step};
pub use validate::{ValidationResult, ValidationRule, ValidationSummary, validate_rule_set};

use thiserror::Error;

/// Errors from token naming and reference resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// A rule references a property or path that has no value.
    #[error("unresolved color reference: {0}")]
    UnresolvedColorReference(String),

    /// Text that does not name a palette slot.
    #[error("unknown color path: {0:?}")]
    UnknownColorPath(String),

    /// A token that does not decode as a color.
    #[error(transparent)]
    Color(#[from] p_color::ColorError),
}
