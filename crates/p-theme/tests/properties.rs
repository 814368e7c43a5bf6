//! Property-based tests for the contrast engine.
//!
//! Uses proptest to check the algebraic guarantees of the ratio and the
//! nesting of the AA/AAA ladder over arbitrary opaque colors.

use p_color::Rgb;
use p_theme::builtin::{default_palette, default_rules};
use p_theme::contrast::{Level, classify, classify_ratio, contrast_ratio};
use p_theme::validate_rule_set;
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Any opaque color as an uppercase `#RRGGBB` token.
fn hex_strategy() -> impl Strategy<Value = String> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b).to_hex())
}

/// Same color space, but with random casing and an optional `#`.
fn loose_hex_strategy() -> impl Strategy<Value = String> {
    (hex_strategy(), any::<bool>(), any::<bool>()).prop_map(|(hex, lower, hash)| {
        let hex = if lower { hex.to_lowercase() } else { hex };
        if hash { hex } else { hex.trim_start_matches('#').to_owned() }
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Argument order never matters.
    #[test]
    fn ratio_is_commutative(a in hex_strategy(), b in hex_strategy()) {
        let ab = contrast_ratio(&a, &b);
        let ba = contrast_ratio(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12, "{a}/{b}: {ab} vs {ba}");
    }

    /// Every ratio between valid colors lies in [1, 21].
    #[test]
    fn ratio_is_bounded(a in loose_hex_strategy(), b in loose_hex_strategy()) {
        let ratio = contrast_ratio(&a, &b);
        prop_assert!((1.0 - 1e-9..=21.0 + 1e-9).contains(&ratio), "{a}/{b}: {ratio}");
    }

    /// A color against itself has no contrast.
    #[test]
    fn ratio_identity(a in hex_strategy()) {
        prop_assert!((contrast_ratio(&a, &a) - 1.0).abs() < 1e-12);
    }

    /// Case and the leading `#` do not change the result.
    #[test]
    fn ratio_ignores_spelling(a in hex_strategy(), b in hex_strategy()) {
        let plain = contrast_ratio(&a, &b);
        let lowered = contrast_ratio(&a.to_lowercase(), b.trim_start_matches('#'));
        prop_assert!((plain - lowered).abs() < 1e-12);
    }

    /// A level is only granted when the ratio clears that level's threshold.
    #[test]
    fn ladder_is_nested(ratio in 1.0f64..21.0, large in any::<bool>()) {
        let level = classify_ratio(ratio, large);
        for rung in [Level::Aa, Level::Aaa] {
            let threshold = rung.threshold(large).unwrap();
            prop_assert_eq!(level >= rung, ratio >= threshold, "{} at {}", level, ratio);
        }
        // Large text is never judged more harshly than normal text.
        prop_assert!(classify_ratio(ratio, true) >= classify_ratio(ratio, false));
    }

    /// Classifying a pair agrees with classifying its ratio.
    #[test]
    fn classify_matches_ratio(fg in hex_strategy(), bg in hex_strategy(), large in any::<bool>()) {
        let expected = classify_ratio(contrast_ratio(&fg, &bg), large);
        prop_assert_eq!(classify(&fg, &bg, large), expected);
    }

    /// Garbage never panics and always yields a finite ratio.
    #[test]
    fn malformed_input_is_finite(junk in "[^#0-9a-fA-F]{0,12}", b in hex_strategy()) {
        let ratio = contrast_ratio(&junk, &b);
        prop_assert!(ratio.is_finite());
        prop_assert_eq!(classify(&junk, &b, false), Level::Fail);
    }
}

#[test]
fn rule_set_is_complete_and_ordered() {
    let rules = default_rules();
    let palette = default_palette();
    let ids: Vec<String> = validate_rule_set(&rules, &palette).map(|r| r.rule.id).collect();
    let expected: Vec<String> = rules.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, expected);
}
