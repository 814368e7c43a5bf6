//! WCAG 2.x contrast math and pass/fail classification.
//!
//! Everything here is pure. Colors come in as hex tokens, get decoded to
//! 8-bit sRGB, linearized with the WCAG transfer curve, and weighted into a
//! relative luminance:
//!
//!   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
//!
//! Two luminances give a contrast ratio in [1, 21], which is then laddered
//! against the WCAG thresholds:
//!
//! | Level | Normal text | Large text (>= 18pt, or 14pt bold) |
//! |-------|-------------|------------------------------------|
//! | AA    | 4.5         | 3.0                                |
//! | AAA   | 7.0         | 4.5                                |
//!
//! A malformed token never panics and never propagates out of the
//! recovering entry points: [`contrast_ratio`] logs a warning and yields a
//! ratio of 0, which classifies as [`Level::Fail`].

use std::fmt;

use p_color::{ColorError, ColorToken, Hsl, Rgb, srgb_to_linear};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// AA minimum for normal text.
pub const AA_NORMAL: f64 = 4.5;
/// AA minimum for large text.
pub const AA_LARGE: f64 = 3.0;
/// AAA minimum for normal text.
pub const AAA_NORMAL: f64 = 7.0;
/// AAA minimum for large text.
pub const AAA_LARGE: f64 = 4.5;

/// Ratio substituted when either color cannot be decoded.
pub const FALLBACK_RATIO: f64 = 0.0;

// ---------------------------------------------------------------------------
// Luminance and ratio
// ---------------------------------------------------------------------------

/// Relative luminance of an already-decoded color, in [0.0, 1.0].
#[must_use]
pub fn luminance_of(color: Rgb) -> f64 {
    let (r, g, b) = color.to_unit();
    let r_lin = srgb_to_linear(r);
    let g_lin = srgb_to_linear(g);
    let b_lin = srgb_to_linear(b);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Relative luminance of a hex token.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `color` is not a six-digit
/// hex color.
pub fn relative_luminance(color: &str) -> Result<f64, ColorError> {
    Rgb::from_hex(color).map(luminance_of)
}

/// Contrast ratio between two decoded colors. Commutative, in [1, 21].
#[must_use]
pub fn rgb_contrast(a: Rgb, b: Rgb) -> f64 {
    let la = luminance_of(a);
    let lb = luminance_of(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex tokens.
///
/// # Errors
///
/// Returns the first decoding failure.
pub fn try_contrast_ratio(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(rgb_contrast(Rgb::from_hex(a)?, Rgb::from_hex(b)?))
}

/// Contrast ratio between two hex tokens, recovering from bad input.
///
/// Returns [`FALLBACK_RATIO`] and emits a warning if either token is
/// malformed.
#[must_use]
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    try_contrast_ratio(a, b).unwrap_or_else(|err| {
        warn!(error = %err, foreground = a, background = b, "invalid color format, using fallback ratio");
        FALLBACK_RATIO
    })
}

/// Round to two decimals, the precision reported to users.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// WCAG conformance level of a color pair.
///
/// Ordered so that `Fail < Aa < Aaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "FAIL",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }

    /// Minimum ratio for this level, or `None` for [`Level::Fail`].
    #[must_use]
    pub const fn threshold(self, is_large_text: bool) -> Option<f64> {
        match (self, is_large_text) {
            (Self::Fail, _) => None,
            (Self::Aa, false) => Some(AA_NORMAL),
            (Self::Aa, true) => Some(AA_LARGE),
            (Self::Aaa, false) => Some(AAA_NORMAL),
            (Self::Aaa, true) => Some(AAA_LARGE),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ladder a ratio against the thresholds. AAA is checked first.
#[must_use]
pub fn classify_ratio(ratio: f64, is_large_text: bool) -> Level {
    let aaa = if is_large_text { AAA_LARGE } else { AAA_NORMAL };
    let aa = if is_large_text { AA_LARGE } else { AA_NORMAL };
    if ratio >= aaa {
        Level::Aaa
    } else if ratio >= aa {
        Level::Aa
    } else {
        Level::Fail
    }
}

/// Classify a foreground/background pair.
#[must_use]
pub fn classify(foreground: &str, background: &str, is_large_text: bool) -> Level {
    classify_ratio(contrast_ratio(foreground, background), is_large_text)
}

/// Whether the pair meets WCAG AA.
#[must_use]
pub fn meets_aa(foreground: &str, background: &str, is_large_text: bool) -> bool {
    classify(foreground, background, is_large_text) >= Level::Aa
}

/// Whether the pair meets WCAG AAA.
#[must_use]
pub fn meets_aaa(foreground: &str, background: &str, is_large_text: bool) -> bool {
    classify(foreground, background, is_large_text) == Level::Aaa
}

/// Everything a contrast badge needs for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastCheck {
    /// Ratio rounded to two decimals.
    pub ratio: f64,
    pub level: Level,
    pub passes: bool,
    pub meets_aa: bool,
    pub meets_aaa: bool,
}

/// Check a pair in one pass.
#[must_use]
pub fn check(foreground: &str, background: &str, is_large_text: bool) -> ContrastCheck {
    let ratio = contrast_ratio(foreground, background);
    let level = classify_ratio(ratio, is_large_text);
    ContrastCheck {
        ratio: round2(ratio),
        level,
        passes: level != Level::Fail,
        meets_aa: level >= Level::Aa,
        meets_aaa: level == Level::Aaa,
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Luminance above which a background counts as light.
const LIGHT_BACKGROUND: f64 = 0.18;

/// Find a color close to `base` that reaches `target` on `background`.
///
/// Keeps the hue and saturation of `base` and binary-searches HSL
/// lightness: darker on light backgrounds, lighter on dark ones. Returns
/// `base` unchanged when it already passes, when `target` is
/// [`Level::Fail`], or when no lightness reaches the target (a warning is
/// logged in the last case and for undecodable input).
#[must_use]
pub fn suggest_accessible(base: &str, background: &str, target: Level) -> ColorToken {
    let unchanged = || ColorToken::new(base);
    let Some(min_ratio) = target.threshold(false) else {
        return unchanged();
    };
    let (fg, bg) = match (Rgb::from_hex(base), Rgb::from_hex(background)) {
        (Ok(fg), Ok(bg)) => (fg, bg),
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, base, background, "cannot suggest a color for undecodable input");
            return unchanged();
        }
    };
    if rgb_contrast(fg, bg) >= min_ratio {
        return unchanged();
    }

    let hsl = Hsl::from_rgb(fg);
    let darken = luminance_of(bg) > LIGHT_BACKGROUND;
    let (mut lo, mut hi) = if darken { (0.0, hsl.l) } else { (hsl.l, 100.0) };

    let mut best = None;
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = hsl.with_lightness(mid).to_rgb();
        if rgb_contrast(candidate, bg) >= min_ratio {
            best = Some(candidate);
            // Passed; move back toward the original lightness.
            if darken {
                lo = mid;
            } else {
                hi = mid;
            }
        } else if darken {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    best.map_or_else(
        || {
            warn!(base, background, level = %target, "no lightness of this hue meets the target level");
            unchanged()
        },
        ColorToken::from,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance("#000000").unwrap();
        assert!(approx_eq(lum, 0.0, 1e-9), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance("#FFFFFF").unwrap();
        assert!(approx_eq(lum, 1.0, 1e-9), "White luminance: {lum}");
    }

    #[test]
    fn luminance_channel_weights() {
        assert!(approx_eq(relative_luminance("#FF0000").unwrap(), 0.2126, 1e-9));
        assert!(approx_eq(relative_luminance("#00FF00").unwrap(), 0.7152, 1e-9));
        assert!(approx_eq(relative_luminance("#0000FF").unwrap(), 0.0722, 1e-9));
    }

    #[test]
    fn luminance_rejects_malformed() {
        assert!(matches!(
            relative_luminance("nope"),
            Err(ColorError::InvalidColorFormat(_))
        ));
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio("#FFFFFF", "#000000");
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let ratio = contrast_ratio("#7C3AED", "#7c3aed");
        assert!(approx_eq(ratio, 1.0, 1e-12), "Same-color contrast: {ratio}");
    }

    #[test]
    fn contrast_is_symmetric() {
        let ab = contrast_ratio("#EF4444", "#0F172A");
        let ba = contrast_ratio("#0F172A", "#EF4444");
        assert!(approx_eq(ab, ba, 1e-12), "Asymmetric: {ab} vs {ba}");
    }

    #[test]
    fn contrast_reference_values() {
        // Reference values from published WCAG checkers.
        assert!(approx_eq(contrast_ratio("#767676", "#FFFFFF"), 4.54, 0.01));
        assert!(approx_eq(contrast_ratio("#FF0000", "#FFFFFF"), 4.0, 0.01));
        assert!(approx_eq(contrast_ratio("#1E293B", "#FFFFFF"), 14.62, 0.05));
    }

    #[test]
    fn brand_navy_on_near_white_is_accessible() {
        let ratio = contrast_ratio("#0A0E27", "#F8FAFC");
        assert!(ratio >= AA_NORMAL, "navy on near-white: {ratio}");
        assert!(classify("#0A0E27", "#F8FAFC", false) >= Level::Aa);
    }

    #[test]
    fn malformed_input_falls_back_to_zero() {
        let ratio = contrast_ratio("not-a-color", "#FFFFFF");
        assert!(ratio.is_finite());
        assert!(approx_eq(ratio, FALLBACK_RATIO, f64::EPSILON));
        assert!(try_contrast_ratio("not-a-color", "#FFFFFF").is_err());
        assert_eq!(classify("not-a-color", "#FFFFFF", true), Level::Fail);
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn ladder_normal_text() {
        assert_eq!(classify_ratio(7.0, false), Level::Aaa);
        assert_eq!(classify_ratio(6.99, false), Level::Aa);
        assert_eq!(classify_ratio(4.5, false), Level::Aa);
        assert_eq!(classify_ratio(4.49, false), Level::Fail);
    }

    #[test]
    fn ladder_large_text() {
        assert_eq!(classify_ratio(4.5, true), Level::Aaa);
        assert_eq!(classify_ratio(3.0, true), Level::Aa);
        assert_eq!(classify_ratio(2.99, true), Level::Fail);
    }

    #[test]
    fn large_text_relaxes_thresholds() {
        assert_eq!(classify_ratio(3.5, false), Level::Fail);
        assert!(classify_ratio(3.5, true) >= Level::Aa);
    }

    #[test]
    fn thresholds_are_nested() {
        for large in [false, true] {
            let aa = Level::Aa.threshold(large).unwrap();
            let aaa = Level::Aaa.threshold(large).unwrap();
            assert!(aaa > aa);
        }
        assert_eq!(Level::Fail.threshold(false), None);
    }

    #[test]
    fn level_display_and_serde() {
        assert_eq!(Level::Aaa.to_string(), "AAA");
        assert_eq!(serde_json::to_string(&Level::Fail).unwrap(), "\"FAIL\"");
        assert_eq!(serde_json::from_str::<Level>("\"AA\"").unwrap(), Level::Aa);
    }

    #[test]
    fn check_reports_all_fields() {
        let c = check("#000000", "#FFFFFF", false);
        assert_eq!(
            c,
            ContrastCheck { ratio: 21.0, level: Level::Aaa, passes: true, meets_aa: true, meets_aaa: true }
        );
        let c = check("#F59E0B", "#F8FAFC", false);
        assert_eq!(c.level, Level::Fail);
        assert!(!c.passes && !c.meets_aa && !c.meets_aaa);
    }

    #[test]
    fn meets_helpers_agree_with_check() {
        for (fg, bg) in [("#0A0E27", "#F8FAFC"), ("#7C3AED", "#F8FAFC"), ("#10B981", "#F8FAFC")] {
            let c = check(fg, bg, false);
            assert_eq!(meets_aa(fg, bg, false), c.meets_aa, "{fg} on {bg}");
            assert_eq!(meets_aaa(fg, bg, false), c.meets_aaa, "{fg} on {bg}");
        }
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!(approx_eq(round2(4.543_21), 4.54, 1e-9));
        assert!(approx_eq(round2(20.999), 21.0, 1e-9));
    }

    // ── suggest_accessible ──────────────────────────────────────────

    #[test]
    fn suggestion_keeps_passing_color() {
        let s = suggest_accessible("#0A0E27", "#F8FAFC", Level::Aa);
        assert_eq!(s.as_str(), "#0A0E27");
    }

    #[test]
    fn suggestion_darkens_on_light_background() {
        let s = suggest_accessible("#F59E0B", "#F8FAFC", Level::Aa);
        let ratio = contrast_ratio(s.as_str(), "#F8FAFC");
        assert!(ratio >= AA_NORMAL, "suggested {s}: {ratio}");
        let before = relative_luminance("#F59E0B").unwrap();
        let after = relative_luminance(s.as_str()).unwrap();
        assert!(after < before, "should have darkened");
    }

    #[test]
    fn suggestion_lightens_on_dark_background() {
        let s = suggest_accessible("#1E3A8A", "#0A0E27", Level::Aaa);
        let ratio = contrast_ratio(s.as_str(), "#0A0E27");
        assert!(ratio >= AAA_NORMAL, "suggested {s}: {ratio}");
    }

    #[test]
    fn suggestion_preserves_hue() {
        let s = suggest_accessible("#10B981", "#F8FAFC", Level::Aa);
        let before = Hsl::from_rgb(Rgb::from_hex("#10B981").unwrap());
        let after = Hsl::from_rgb(s.rgb().unwrap());
        assert!((before.h - after.h).abs() < 5.0, "hue shifted: {} -> {}", before.h, after.h);
    }

    #[test]
    fn suggestion_with_bad_input_returns_base() {
        assert_eq!(suggest_accessible("oops", "#FFFFFF", Level::Aa).as_str(), "oops");
        assert_eq!(suggest_accessible("#777777", "#FFFFFF", Level::Fail).as_str(), "#777777");
    }
}
