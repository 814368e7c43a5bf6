//! Rule-set validation — contrast verdicts for named color pairs.
//!
//! A [`ValidationRule`] names a foreground/background pair by reference.
//! [`validate_rule_set`] resolves each pair against a [`ColorLookup`],
//! computes the ratio, classifies it, and yields one [`ValidationResult`]
//! per rule in input order. The iterator is lazy and reads the lookup as
//! it goes, so it always reflects the colors current at iteration time;
//! calling again starts a fresh pass.
//!
//! # Severity
//!
//! `AAA` and `AA` map to [`Severity::Success`], `FAIL` to
//! [`Severity::Error`]. [`Severity::Warning`] exists so consumers can match
//! on it, but no classification path currently produces it.

use p_color::ColorToken;
use serde::{Deserialize, Serialize};

use crate::contrast::{Level, classify_ratio, contrast_ratio, round2};
use crate::reference::{ColorLookup, ColorRef};

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A named color pair to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub id: String,
    pub name: String,
    pub foreground: ColorRef,
    pub background: ColorRef,
    /// Baseline ratio the pair is expected to reach. Informational: the
    /// pass/fail verdict follows the WCAG AA threshold for the text size.
    pub min_ratio: f64,
    #[serde(default)]
    pub is_large_text: bool,
}

impl ValidationRule {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        foreground: impl Into<ColorRef>,
        background: impl Into<ColorRef>,
        min_ratio: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            foreground: foreground.into(),
            background: background.into(),
            min_ratio,
            is_large_text: false,
        }
    }

    /// Mark the rule as applying to large text.
    #[must_use]
    pub const fn large_text(mut self) -> Self {
        self.is_large_text = true;
        self
    }

    /// Apply a partial update. The id is never changed.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(fg) = patch.foreground {
            self.foreground = fg;
        }
        if let Some(bg) = patch.background {
            self.background = bg;
        }
        if let Some(min_ratio) = patch.min_ratio {
            self.min_ratio = min_ratio;
        }
        if let Some(large) = patch.is_large_text {
            self.is_large_text = large;
        }
    }
}

/// Partial update for a [`ValidationRule`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePatch {
    pub name: Option<String>,
    pub foreground: Option<ColorRef>,
    pub background: Option<ColorRef>,
    pub min_ratio: Option<f64>,
    pub is_large_text: Option<bool>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// How a consumer should present a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    /// Severity for a classification. Never returns `Warning`.
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::Aaa | Level::Aa => Self::Success,
            Level::Fail => Self::Error,
        }
    }
}

/// The verdict for one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub rule: ValidationRule,
    /// The colors the references resolved to.
    pub foreground: ColorToken,
    pub background: ColorToken,
    /// Contrast ratio rounded to two decimals.
    pub ratio: f64,
    pub passes: bool,
    pub level: Level,
    pub severity: Severity,
}

impl ValidationResult {
    /// Whether the ratio reaches the rule's own `min_ratio` baseline.
    #[must_use]
    pub fn meets_min_ratio(&self) -> bool {
        self.ratio >= self.rule.min_ratio
    }
}

/// Validate a single rule.
#[must_use]
pub fn validate_rule(rule: &ValidationRule, lookup: &impl ColorLookup) -> ValidationResult {
    let foreground = rule.foreground.resolve(lookup);
    let background = rule.background.resolve(lookup);
    let ratio = contrast_ratio(foreground.as_str(), background.as_str());
    let level = classify_ratio(ratio, rule.is_large_text);

    ValidationResult {
        rule: rule.clone(),
        foreground,
        background,
        ratio: round2(ratio),
        passes: level != Level::Fail,
        level,
        severity: Severity::for_level(level),
    }
}

/// Validate `rules` in order, lazily.
pub fn validate_rule_set<'a, L: ColorLookup>(
    rules: &'a [ValidationRule],
    lookup: &'a L,
) -> impl Iterator<Item = ValidationResult> + 'a {
    rules.iter().map(move |rule| validate_rule(rule, lookup))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate counts over a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Pass rate, 0–100, rounded. An empty pass counts as 100.
    pub percentage: u8,
    pub errors: usize,
    pub warnings: usize,
    pub is_valid: bool,
}

impl ValidationSummary {
    #[must_use]
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passes).count();
        let failed = total - passed;
        let percentage = if total == 0 {
            100
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pct = ((passed as f64 / total as f64) * 100.0).round() as u8;
            pct
        };

        Self {
            total,
            passed,
            failed,
            percentage,
            errors: results.iter().filter(|r| r.severity == Severity::Error).count(),
            warnings: results.iter().filter(|r| r.severity == Severity::Warning).count(),
            is_valid: failed == 0,
        }
    }
}
