//! CSS custom-property generation.
//!
//! The projection contract between a palette and the style root:
//!
//! ```text
//! --color-primary-{50..950}       11 entries
//! --color-accent-{cyan|purple|green|orange}
//! --color-neutral-{50..950}       11 entries
//! --color-semantic-{success|warning|error|info}
//! --gradient-{name}               one per stock gradient
//! --font-* / --typography-* / …   fixed typography tokens
//! ```
//!
//! Color values are written exactly as stored in the palette, no
//! normalization. Order is stable so projected output diffs cleanly.

use crate::gradient::default_gradients;
use crate::palette::ThemePalette;
use crate::typography::typography_css_properties;

/// Prefix shared by every gradient custom property.
pub const GRADIENT_PROPERTY_PREFIX: &str = "--gradient-";

/// Every custom property for `palette`: colors, gradients, then typography.
#[must_use]
pub fn css_custom_properties(palette: &ThemePalette) -> Vec<(String, String)> {
    let colors = palette
        .iter()
        .map(|(path, token)| (path.css_property(), token.to_string()));
    let gradients = default_gradients()
        .into_iter()
        .map(|(name, gradient)| (format!("{GRADIENT_PROPERTY_PREFIX}{name}"), gradient.css(palette)));
    colors.chain(gradients).chain(typography_css_properties()).collect()
}

/// Render properties as a stylesheet rule.
#[must_use]
pub fn stylesheet<'a, I>(properties: I, selector: &str) -> String
where
    I: IntoIterator<Item = &'a (String, String)>,
{
    let mut out = format!("{selector} {{\n");
    for (name, value) in properties {
        out.push_str("  ");
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}
