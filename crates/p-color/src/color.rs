// SPDX-License-Identifier: MIT
//
// Opaque 8-bit sRGB colors and the WCAG linearization curve.
//
// Palette tokens carry no alpha, so `Rgb` carries none either. Opacity only
// shows up on the way out, as an `rgba()` string for CSS consumers.

use std::fmt;
use std::str::FromStr;

use crate::ColorError;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque sRGB color with 8 bits per channel.
///
/// # Examples
///
/// ```
/// use p_color::Rgb;
///
/// let navy = Rgb::from_hex("#0A0E27").unwrap();
/// assert_eq!(navy, Rgb::new(10, 14, 39));
/// assert_eq!(navy.to_hex(), "#0A0E27");
/// assert_eq!(navy.with_opacity(0.9), "rgba(10, 14, 39, 0.9)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a six-digit hex color. The leading `#` is optional and the
    /// digits are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] for anything that is not
    /// exactly six hex digits (short `#RGB` forms and alpha are rejected).
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        parse_hex(s).ok_or_else(|| ColorError::InvalidColorFormat(s.to_owned()))
    }

    /// Channels normalized to [0.0, 1.0].
    #[must_use]
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Build from unit-range channels, clamping and rounding to 8 bits.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Uppercase `#RRGGBB`, the form the default palette is written in.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` expression with the given opacity.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> String {
        format!("rgba({}, {}, {}, {opacity})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// ─── Linearization ───────────────────────────────────────────────────────────

/// sRGB transfer function, inverse direction, as written in WCAG 2.x.
///
/// WCAG uses 0.03928 as the breakpoint rather than the 0.04045 of the sRGB
/// standard. The two only disagree for channel values that cannot occur
/// with 8-bit input, but the WCAG constant is kept so computed ratios match
/// published checkers digit for digit.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
