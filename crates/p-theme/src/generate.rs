//! Scale generation — an 11-step scale from one brand color.
//!
//! The base color contributes only its hue and saturation. Lightness comes
//! from a fixed table tuned so the dark end (`700` and below) carries body
//! text on light backgrounds and the light end (`300` and above) carries it
//! on dark ones. Saturation is damped at the pale end and boosted at the
//! deep end so the extremes don't read as washed out or muddy.

use p_color::{ColorError, ColorToken, Hsl, Rgb};
use serde::Serialize;

use crate::contrast::{AA_NORMAL, rgb_contrast, round2};
use crate::path::Semantic;
use crate::scale::{ColorScale, Step};

/// Target HSL lightness per step.
const LIGHTNESS: [(Step, f64); 11] = [
    (Step::S50, 97.0),
    (Step::S100, 94.0),
    (Step::S200, 87.0),
    (Step::S300, 74.0),
    (Step::S400, 56.0),
    (Step::S500, 47.0),
    (Step::S600, 38.0),
    (Step::S700, 29.0),
    (Step::S800, 23.0),
    (Step::S900, 8.0),
    (Step::S950, 4.0),
];

fn lightness_for(step: Step) -> f64 {
    LIGHTNESS
        .iter()
        .find(|(s, _)| *s == step)
        .map_or(50.0, |(_, l)| *l)
}

fn saturation_for(base: f64, lightness: f64) -> f64 {
    if lightness > 80.0 {
        (base * 0.3).max(10.0)
    } else if lightness < 20.0 {
        (base * 1.2).min(90.0)
    } else {
        base
    }
}

/// Generate a scale sharing the hue of `base`.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if `base` is not a hex color.
pub fn generate_scale(base: &str) -> Result<ColorScale, ColorError> {
    let hsl = Hsl::from_rgb(Rgb::from_hex(base)?).rounded();
    Ok(ColorScale::from_fn(|step| {
        let l = lightness_for(step);
        let color = Hsl::new(hsl.h, saturation_for(hsl.s, l), l).to_rgb();
        ColorToken::from(color)
    }))
}

/// Contrast of one scale step against a light and a dark background.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleStepReport {
    pub step: Step,
    pub color: ColorToken,
    pub light_bg_contrast: f64,
    pub dark_bg_contrast: f64,
    pub light_bg_passes: bool,
    pub dark_bg_passes: bool,
}

/// Check every step of `scale` against both backgrounds at WCAG AA.
///
/// Steps whose token does not decode are reported with a ratio of 0.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] if either background is
/// not a hex color.
pub fn validate_scale(
    scale: &ColorScale,
    light_bg: &str,
    dark_bg: &str,
) -> Result<Vec<ScaleStepReport>, ColorError> {
    let light = Rgb::from_hex(light_bg)?;
    let dark = Rgb::from_hex(dark_bg)?;

    Ok(scale
        .iter()
        .map(|(step, token)| {
            let (lc, dc) = token
                .rgb()
                .map_or((0.0, 0.0), |rgb| (rgb_contrast(rgb, light), rgb_contrast(rgb, dark)));
            ScaleStepReport {
                step,
                color: token.clone(),
                light_bg_contrast: round2(lc),
                dark_bg_contrast: round2(dc),
                light_bg_passes: lc >= AA_NORMAL,
                dark_bg_passes: dc >= AA_NORMAL,
            }
        })
        .collect())
}

/// Mode-specific variants of one semantic color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SemanticVariant {
    /// For text on light backgrounds.
    pub light: &'static str,
    /// For text on dark backgrounds.
    pub dark: &'static str,
    /// The palette's everyday token.
    pub base: &'static str,
}

/// Light/dark variants for each semantic role.
///
/// The base tokens are bright enough for fills but fail AA as text on light
/// backgrounds; `light` variants are one shade darker and reach at least the
/// large-text threshold.
#[must_use]
pub const fn semantic_variants() -> [(Semantic, SemanticVariant); 4] {
    [
        (Semantic::Success, SemanticVariant { light: "#059669", dark: "#34D399", base: "#10B981" }),
        (Semantic::Warning, SemanticVariant { light: "#D97706", dark: "#FBBF24", base: "#F59E0B" }),
        (Semantic::Error, SemanticVariant { light: "#DC2626", dark: "#F87171", base: "#EF4444" }),
        (Semantic::Info, SemanticVariant { light: "#0284C7", dark: "#38BDF8", base: "#00D4FF" }),
    ]
}
