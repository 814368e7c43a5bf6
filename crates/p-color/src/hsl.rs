// SPDX-License-Identifier: MIT
//
// HSL — the space the scale generator works in.
//
// Hue in degrees [0, 360), saturation and lightness in percent [0, 100].
// Not perceptually uniform, but it is what designers type into color
// pickers, and the generated scales are specified as HSL lightness steps.

use crate::color::Rgb;

/// A color in HSL coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees.
    pub h: f64,
    /// Saturation, percent.
    pub s: f64,
    /// Lightness, percent.
    pub l: f64,
}

impl Hsl {
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert from sRGB.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }

    /// Round every component to a whole number.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(self.h.round(), self.s.round(), self.l.round())
    }

    /// Return a copy with a different lightness (percent, clamped).
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l: l.clamp(0.0, 100.0), ..self }
    }

    /// Return a copy with a different saturation (percent, clamped).
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self { s: s.clamp(0.0, 100.0), ..self }
    }

    /// Convert to sRGB, rounding each channel to 8 bits.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let l = self.l / 100.0;
        let a = self.s * l.min(1.0 - l) / 100.0;
        let f = |n: f64| {
            let k = (n + self.h / 30.0).rem_euclid(12.0);
            l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
        };
        Rgb::from_unit(f(0.0), f(8.0), f(4.0))
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}
