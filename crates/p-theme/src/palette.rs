//! The theme palette — the aggregate every other piece reads from.
//!
//! A [`ThemePalette`] is two 11-step scales (primary, neutral) plus two
//! fixed sets of named tokens (accent, semantic). Edits arrive as a
//! [`PalettePatch`], a nested partial palette that is merged slot by slot:
//! patching `primary.900` leaves the other ten primary steps alone.

use std::collections::BTreeMap;

use p_color::ColorToken;
use serde::{Deserialize, Serialize};

use crate::path::{Accent, ColorPath, Semantic};
use crate::scale::{ColorScale, Step};

// ---------------------------------------------------------------------------
// AccentColors / SemanticColors
// ---------------------------------------------------------------------------

/// Accent tokens for highlights and calls to action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColors {
    pub cyan: ColorToken,
    pub purple: ColorToken,
    pub green: ColorToken,
    pub orange: ColorToken,
}

impl AccentColors {
    #[must_use]
    pub const fn get(&self, accent: Accent) -> &ColorToken {
        match accent {
            Accent::Cyan => &self.cyan,
            Accent::Purple => &self.purple,
            Accent::Green => &self.green,
            Accent::Orange => &self.orange,
        }
    }

    pub fn set(&mut self, accent: Accent, token: ColorToken) {
        match accent {
            Accent::Cyan => self.cyan = token,
            Accent::Purple => self.purple = token,
            Accent::Green => self.green = token,
            Accent::Orange => self.orange = token,
        }
    }
}

/// Semantic tokens for UI states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColors {
    pub success: ColorToken,
    pub warning: ColorToken,
    pub error: ColorToken,
    pub info: ColorToken,
}

impl SemanticColors {
    #[must_use]
    pub const fn get(&self, semantic: Semantic) -> &ColorToken {
        match semantic {
            Semantic::Success => &self.success,
            Semantic::Warning => &self.warning,
            Semantic::Error => &self.error,
            Semantic::Info => &self.info,
        }
    }

    pub fn set(&mut self, semantic: Semantic, token: ColorToken) {
        match semantic {
            Semantic::Success => self.success = token,
            Semantic::Warning => self.warning = token,
            Semantic::Error => self.error = token,
            Semantic::Info => self.info = token,
        }
    }
}

// ---------------------------------------------------------------------------
// ThemePalette
// ---------------------------------------------------------------------------

/// The complete color palette.
///
/// Serializes as `{ "primary": {"50": ..}, "accent": {..}, "neutral": {..},
/// "semantic": {..} }`, the shape stored in theme snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub primary: ColorScale,
    pub accent: AccentColors,
    pub neutral: ColorScale,
    pub semantic: SemanticColors,
}

impl ThemePalette {
    /// The token at `path`.
    #[must_use]
    pub const fn get(&self, path: ColorPath) -> &ColorToken {
        match path {
            ColorPath::Primary(step) => self.primary.get(step),
            ColorPath::Accent(accent) => self.accent.get(accent),
            ColorPath::Neutral(step) => self.neutral.get(step),
            ColorPath::Semantic(semantic) => self.semantic.get(semantic),
        }
    }

    /// Replace the token at `path`. No format check is made here.
    pub fn set(&mut self, path: ColorPath, token: ColorToken) {
        match path {
            ColorPath::Primary(step) => self.primary.set(step, token),
            ColorPath::Accent(accent) => self.accent.set(accent, token),
            ColorPath::Neutral(step) => self.neutral.set(step, token),
            ColorPath::Semantic(semantic) => self.semantic.set(semantic, token),
        }
    }

    /// Merge `patch` into this palette, slot by slot.
    pub fn apply(&mut self, patch: &PalettePatch) {
        for (path, token) in patch.iter() {
            self.set(path, token.clone());
        }
    }

    /// A copy of this palette with `patch` merged in.
    #[must_use]
    pub fn merged(&self, patch: &PalettePatch) -> Self {
        let mut out = self.clone();
        out.apply(patch);
        out
    }

    /// Iterate every `(path, token)` in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorPath, &ColorToken)> + '_ {
        ColorPath::all().map(move |path| (path, self.get(path)))
    }
}

// ---------------------------------------------------------------------------
// PalettePatch
// ---------------------------------------------------------------------------

/// A partial palette. Any subset of slots, grouped the same way as
/// [`ThemePalette`], so a JSON patch reads like a fragment of a snapshot:
///
/// ```json
/// { "primary": { "900": "#111827" }, "accent": { "cyan": "#22D3EE" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePatch {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub primary: BTreeMap<Step, ColorToken>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub accent: BTreeMap<Accent, ColorToken>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub neutral: BTreeMap<Step, ColorToken>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub semantic: BTreeMap<Semantic, ColorToken>,
}

impl PalettePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, path: ColorPath, token: impl Into<ColorToken>) -> Self {
        self.set(path, token.into());
        self
    }

    pub fn set(&mut self, path: ColorPath, token: ColorToken) {
        match path {
            ColorPath::Primary(step) => {
                self.primary.insert(step, token);
            }
            ColorPath::Accent(accent) => {
                self.accent.insert(accent, token);
            }
            ColorPath::Neutral(step) => {
                self.neutral.insert(step, token);
            }
            ColorPath::Semantic(semantic) => {
                self.semantic.insert(semantic, token);
            }
        }
    }

    /// Number of slots this patch touches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primary.len() + self.accent.len() + self.neutral.len() + self.semantic.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the patched slots in projection order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorPath, &ColorToken)> + '_ {
        let primary = self.primary.iter().map(|(s, t)| (ColorPath::Primary(*s), t));
        let accent = self.accent.iter().map(|(a, t)| (ColorPath::Accent(*a), t));
        let neutral = self.neutral.iter().map(|(s, t)| (ColorPath::Neutral(*s), t));
        let semantic = self.semantic.iter().map(|(s, t)| (ColorPath::Semantic(*s), t));
        primary.chain(accent).chain(neutral).chain(semantic)
    }
}

impl FromIterator<(ColorPath, ColorToken)> for PalettePatch {
    fn from_iter<I: IntoIterator<Item = (ColorPath, ColorToken)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (path, token) in iter {
            patch.set(path, token);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::default_palette;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_and_set_by_path() {
        let mut palette = default_palette();
        let path = ColorPath::Accent(Accent::Orange);
        palette.set(path, ColorToken::from("#FB923C"));
        assert_eq!(palette.get(path).as_str(), "#FB923C");
    }

    #[test]
    fn apply_merges_nested_groups_key_by_key() {
        let base = default_palette();
        let patch = PalettePatch::new().with(ColorPath::Primary(Step::S900), "#111827");
        let merged = base.merged(&patch);

        assert_eq!(merged.primary.get(Step::S900).as_str(), "#111827");
        // The other ten primary steps survive the patch.
        for step in Step::ALL.into_iter().filter(|s| *s != Step::S900) {
            assert_eq!(merged.primary.get(step), base.primary.get(step), "step {step}");
        }
        assert_eq!(merged.neutral, base.neutral);
        assert_eq!(merged.accent, base.accent);
    }

    #[test]
    fn empty_patch_is_identity() {
        let base = default_palette();
        assert_eq!(base.merged(&PalettePatch::new()), base);
    }

    #[test]
    fn malformed_tokens_pass_through() {
        let patch = PalettePatch::new().with(ColorPath::Semantic(Semantic::Error), "reddish");
        let merged = default_palette().merged(&patch);
        assert_eq!(merged.semantic.error.as_str(), "reddish");
    }

    #[test]
    fn patch_deserializes_from_partial_json() {
        let patch: PalettePatch = serde_json::from_str(
            r##"{ "primary": { "900": "#111827" }, "accent": { "cyan": "#22D3EE" } }"##,
        )
        .unwrap();
        assert_eq!(patch.len(), 2);
        let paths: Vec<ColorPath> = patch.iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![ColorPath::Primary(Step::S900), ColorPath::Accent(Accent::Cyan)]
        );
    }

    #[test]
    fn patch_from_iterator_keeps_last_write() {
        let path = ColorPath::Neutral(Step::S50);
        let patch: PalettePatch = [
            (path, ColorToken::from("#FFFFFF")),
            (path, ColorToken::from("#FAFAFA")),
        ]
        .into_iter()
        .collect();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.neutral[&Step::S50].as_str(), "#FAFAFA");
    }

    #[test]
    fn palette_snapshot_shape() {
        let json = serde_json::to_value(default_palette()).unwrap();
        assert_eq!(json["primary"]["900"], "#0A0E27");
        assert_eq!(json["accent"]["cyan"], "#00D4FF");
        assert_eq!(json["semantic"]["error"], "#EF4444");
        let back: ThemePalette = serde_json::from_value(json).unwrap();
        assert_eq!(back, default_palette());
    }

    #[test]
    fn iter_matches_get() {
        let palette = default_palette();
        for (path, token) in palette.iter() {
            assert_eq!(palette.get(path), token);
        }
        assert_eq!(palette.iter().count(), 30);
    }
}
