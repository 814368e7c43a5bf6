//! Typography tokens: font stacks, the type scale, and the shared
//! weight / line-height / letter-spacing ladders.
//!
//! Projected next to the color tokens:
//!
//! ```text
//! --font-{primary|secondary|mono}          font stack
//! --typography-{style}-size                base (mobile) size
//! --typography-{style}-size-{sm|lg}        tablet / desktop sizes
//! --typography-{style}-{line-height|letter-spacing|font-weight|font-family}
//! --font-weight-{name}
//! --line-height-{name}
//! --letter-spacing-{name}
//! ```
//!
//! Unlike colors these are fixed: nothing in the synchronizer edits them.

// ---------------------------------------------------------------------------
// Font families
// ---------------------------------------------------------------------------

const SANS_FALLBACK: &[&str] =
    &["system-ui", "-apple-system", "BlinkMacSystemFont", "Segoe UI", "Roboto", "sans-serif"];

/// A named font with its fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFamily {
    /// Role key: `primary`, `secondary`, or `mono`.
    pub key: &'static str,
    pub name: &'static str,
    pub fallback: &'static [&'static str],
    pub weights: &'static [u16],
    /// The custom property the font loader binds the face to.
    pub variable: &'static str,
}

impl FontFamily {
    /// CSS `font-family` value: the quoted face, then the fallbacks.
    #[must_use]
    pub fn stack(&self) -> String {
        let mut out = format!("\"{}\"", self.name);
        for fallback in self.fallback {
            out.push_str(", ");
            out.push_str(fallback);
        }
        out
    }
}

pub const FONT_FAMILIES: [FontFamily; 3] = [
    FontFamily {
        key: "primary",
        name: "Inter",
        fallback: SANS_FALLBACK,
        weights: &[300, 400, 500, 600, 700, 800],
        variable: "--font-inter",
    },
    FontFamily {
        key: "secondary",
        name: "Poppins",
        fallback: SANS_FALLBACK,
        weights: &[300, 400, 500, 600, 700, 800],
        variable: "--font-poppins",
    },
    FontFamily {
        key: "mono",
        name: "JetBrains Mono",
        fallback: &["Consolas", "Monaco", "Courier New", "monospace"],
        weights: &[300, 400, 500, 600, 700],
        variable: "--font-jetbrains-mono",
    },
];

// ---------------------------------------------------------------------------
// Type scale
// ---------------------------------------------------------------------------

/// Font size per breakpoint: mobile, tablet (640px), desktop (1024px).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveSize {
    pub base: &'static str,
    pub sm: &'static str,
    pub lg: &'static str,
}

/// One named text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: ResponsiveSize,
    pub line_height: &'static str,
    pub letter_spacing: &'static str,
    pub font_weight: &'static str,
    pub font_family: &'static str,
}

const DISPLAY: &str = "var(--font-poppins)";
const TEXT: &str = "var(--font-inter)";
const CODE: &str = "var(--font-jetbrains-mono)";

const fn style(
    sizes: [&'static str; 3],
    line_height: &'static str,
    letter_spacing: &'static str,
    font_weight: &'static str,
    font_family: &'static str,
) -> TextStyle {
    TextStyle {
        size: ResponsiveSize { base: sizes[0], sm: sizes[1], lg: sizes[2] },
        line_height,
        letter_spacing,
        font_weight,
        font_family,
    }
}

/// The type scale, largest first.
pub const TYPE_SCALE: [(&str, TextStyle); 14] = [
    ("display-xl", style(["3rem", "3.75rem", "4.5rem"], "1", "-0.025em", "800", DISPLAY)),
    ("display-lg", style(["2.5rem", "3rem", "3.75rem"], "1.1", "-0.025em", "700", DISPLAY)),
    ("display-md", style(["2rem", "2.5rem", "3rem"], "1.1", "-0.025em", "700", DISPLAY)),
    ("heading-xl", style(["1.875rem", "2rem", "2.25rem"], "1.2", "-0.025em", "700", TEXT)),
    ("heading-lg", style(["1.5rem", "1.75rem", "1.875rem"], "1.3", "-0.025em", "600", TEXT)),
    ("heading-md", style(["1.25rem", "1.375rem", "1.5rem"], "1.4", "-0.025em", "600", TEXT)),
    ("heading-sm", style(["1.125rem", "1.1875rem", "1.25rem"], "1.5", "-0.025em", "600", TEXT)),
    ("body-xl", style(["1rem", "1.0625rem", "1.125rem"], "1.6", "0", "400", TEXT)),
    ("body-lg", style(["0.9375rem", "1rem", "1rem"], "1.6", "0", "400", TEXT)),
    ("body-md", style(["0.875rem", "0.875rem", "0.875rem"], "1.6", "0", "400", TEXT)),
    ("body-sm", style(["0.75rem", "0.75rem", "0.75rem"], "1.6", "0", "400", TEXT)),
    ("code-lg", style(["0.9375rem", "1rem", "1rem"], "1.5", "0", "400", CODE)),
    ("code-md", style(["0.875rem", "0.875rem", "0.875rem"], "1.5", "0", "400", CODE)),
    ("code-sm", style(["0.75rem", "0.75rem", "0.75rem"], "1.5", "0", "400", CODE)),
];

/// Look up a style by name (`"body-md"`).
#[must_use]
pub fn text_style(name: &str) -> Option<&'static TextStyle> {
    TYPE_SCALE.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
}

// ---------------------------------------------------------------------------
// Shared ladders
// ---------------------------------------------------------------------------

pub const FONT_WEIGHTS: [(&str, &str); 6] = [
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
];

pub const LINE_HEIGHTS: [(&str, &str); 6] = [
    ("none", "1"),
    ("tight", "1.1"),
    ("snug", "1.2"),
    ("normal", "1.4"),
    ("relaxed", "1.6"),
    ("loose", "1.8"),
];

pub const LETTER_SPACING: [(&str, &str); 6] = [
    ("tighter", "-0.05em"),
    ("tight", "-0.025em"),
    ("normal", "0"),
    ("wide", "0.025em"),
    ("wider", "0.05em"),
    ("widest", "0.1em"),
];

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Every typography custom property, in a stable order: families, the
/// scale, weights, line heights, letter spacing.
#[must_use]
pub fn typography_css_properties() -> Vec<(String, String)> {
    let mut out = Vec::new();

    for family in &FONT_FAMILIES {
        out.push((format!("--font-{}", family.key), family.stack()));
    }

    for (name, style) in &TYPE_SCALE {
        let prefix = format!("--typography-{name}");
        out.push((format!("{prefix}-size"), style.size.base.to_owned()));
        out.push((format!("{prefix}-size-sm"), style.size.sm.to_owned()));
        out.push((format!("{prefix}-size-lg"), style.size.lg.to_owned()));
        out.push((format!("{prefix}-line-height"), style.line_height.to_owned()));
        out.push((format!("{prefix}-letter-spacing"), style.letter_spacing.to_owned()));
        out.push((format!("{prefix}-font-weight"), style.font_weight.to_owned()));
        out.push((format!("{prefix}-font-family"), style.font_family.to_owned()));
    }

    let ladders = [
        ("--font-weight-", &FONT_WEIGHTS),
        ("--line-height-", &LINE_HEIGHTS),
        ("--letter-spacing-", &LETTER_SPACING),
    ];
    for (prefix, ladder) in ladders {
        for (name, value) in ladder {
            out.push((format!("{prefix}{name}"), (*value).to_owned()));
        }
    }

    out
}
