//! Compiled-in defaults — the brand palette and the stock rule set.
//!
//! The palette is the "deep tech" scheme: navy primaries, slate neutrals,
//! electric accents. Semantic tokens reuse accents where the brand does
//! (success = green, warning = orange, info = cyan).

use crate::palette::{AccentColors, SemanticColors, ThemePalette};
use crate::path::{Accent, ColorPath, Semantic};
use crate::scale::{ColorScale, Step};
use crate::validate::ValidationRule;

const PRIMARY: [&str; 11] = [
    "#F0F4FF", "#E0EAFF", "#C7D8FF", "#A5BFFF", "#7C9EFF", "#3B82F6", "#2563EB", "#1E3A8A",
    "#1E40AF", "#0A0E27", "#050711",
];

const NEUTRAL: [&str; 11] = [
    "#F8FAFC", "#F1F5F9", "#E2E8F0", "#CBD5E1", "#94A3B8", "#64748B", "#475569", "#334155",
    "#1E293B", "#0F172A", "#020617",
];

const CYAN: &str = "#00D4FF";
const PURPLE: &str = "#7C3AED";
const GREEN: &str = "#10B981";
const ORANGE: &str = "#F59E0B";
const RED: &str = "#EF4444";

/// The palette a fresh profile starts with, and what a reset restores.
#[must_use]
pub fn default_palette() -> ThemePalette {
    ThemePalette {
        primary: ColorScale::from_hexes(PRIMARY),
        accent: AccentColors {
            cyan: CYAN.into(),
            purple: PURPLE.into(),
            green: GREEN.into(),
            orange: ORANGE.into(),
        },
        neutral: ColorScale::from_hexes(NEUTRAL),
        semantic: SemanticColors {
            success: GREEN.into(),
            warning: ORANGE.into(),
            error: RED.into(),
            info: CYAN.into(),
        },
    }
}

/// The stock accessibility rules, all normal-size text at a 4.5 baseline.
///
/// Colors are referenced through their custom properties so a pass reads
/// whatever is currently projected.
#[must_use]
pub fn default_rules() -> Vec<ValidationRule> {
    let primary_900 = ColorPath::Primary(Step::S900);
    let neutral_50 = ColorPath::Neutral(Step::S50);
    vec![
        ValidationRule::new(
            "primary-text-light",
            "Primary text on light background",
            primary_900,
            neutral_50,
            4.5,
        ),
        ValidationRule::new(
            "primary-text-dark",
            "Primary text on dark background",
            neutral_50,
            primary_900,
            4.5,
        ),
        ValidationRule::new(
            "accent-cyan-primary",
            "Cyan accent on primary background",
            ColorPath::Accent(Accent::Cyan),
            primary_900,
            4.5,
        ),
        ValidationRule::new(
            "accent-purple-light",
            "Purple accent on light background",
            ColorPath::Accent(Accent::Purple),
            neutral_50,
            4.5,
        ),
        ValidationRule::new(
            "success-light",
            "Success color on light background",
            ColorPath::Semantic(Semantic::Success),
            neutral_50,
            4.5,
        ),
        ValidationRule::new(
            "error-light",
            "Error color on light background",
            ColorPath::Semantic(Semantic::Error),
            neutral_50,
            4.5,
        ),
        ValidationRule::new(
            "warning-light",
            "Warning color on light background",
            ColorPath::Semantic(Semantic::Warning),
            neutral_50,
            4.5,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
