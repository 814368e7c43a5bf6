// SPDX-License-Identifier: MIT
//
// p-color — color primitives for prism.
//
// Everything above this crate speaks in hex color tokens (`#RRGGBB`), the
// format stored in palettes, written to CSS custom properties, and read back
// from the style root. This crate owns the decoding of those tokens into
// 8-bit sRGB, the gamma linearization the contrast math depends on, and the
// HSL round trip used by the scale generator.
//
// Nothing here logs or recovers. Decoding failures come back as
// `ColorError` and the caller decides the fallback.

pub mod color;
pub mod hsl;
pub mod token;

pub use color::{Rgb, srgb_to_linear};
pub use hsl::Hsl;
pub use token::ColorToken;

use thiserror::Error;

/// Errors produced while decoding color values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not a six-digit hex color (`#RRGGBB`, `#` optional).
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),
}
