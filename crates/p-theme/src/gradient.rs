//! Gradient tokens — `linear-gradient()` values built from palette slots.
//!
//! Stops refer to the palette rather than repeating hex values, so a palette
//! edit flows into every gradient on the next projection. Plain stops emit
//! `var(--color-…)` and let CSS resolve them; tinted stops need an alpha
//! channel, which CSS custom properties can't add to a hex value, so those
//! are resolved against the palette at render time.

use std::fmt::Write as _;

use p_color::Rgb;
use tracing::warn;

use crate::palette::ThemePalette;
use crate::path::{Accent, ColorPath, Semantic};
use crate::scale::Step;

/// Direction of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    ToRight,
    ToLeft,
    ToTop,
    ToBottom,
    ToTopRight,
    ToTopLeft,
    ToBottomRight,
    ToBottomLeft,
    /// Angle in degrees.
    Angle(u16),
}

impl GradientDirection {
    #[must_use]
    pub fn css(self) -> String {
        let named = match self {
            Self::ToRight => "to right",
            Self::ToLeft => "to left",
            Self::ToTop => "to top",
            Self::ToBottom => "to bottom",
            Self::ToTopRight => "to top right",
            Self::ToTopLeft => "to top left",
            Self::ToBottomRight => "to bottom right",
            Self::ToBottomLeft => "to bottom left",
            Self::Angle(deg) => return format!("{deg}deg"),
        };
        named.to_owned()
    }
}

/// The color of one gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopColor {
    /// A palette slot, emitted as `var(--color-…)`.
    Var(ColorPath),
    /// A palette slot at reduced opacity, emitted as `rgba(…)`.
    Tinted(ColorPath, f64),
    /// A fixed color at the given opacity.
    Rgba(Rgb, f64),
}

impl StopColor {
    fn css(self, palette: &ThemePalette) -> String {
        match self {
            Self::Var(path) => path.css_var(),
            Self::Tinted(path, alpha) => match palette.get(path).rgb() {
                Ok(rgb) => rgb.with_opacity(alpha),
                Err(err) => {
                    warn!(error = %err, %path, "cannot tint gradient stop, using the plain token");
                    path.css_var()
                }
            },
            Self::Rgba(rgb, alpha) => rgb.with_opacity(alpha),
        }
    }
}

/// One stop: a color and an optional position in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: StopColor,
    pub position: Option<u8>,
}

impl GradientStop {
    #[must_use]
    pub const fn at(color: StopColor, position: u8) -> Self {
        Self { color, position: Some(position) }
    }
}

/// A linear gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// Render as a CSS `linear-gradient()` value.
    ///
    /// A stop at position 0 is written without a position, which CSS
    /// treats identically for a first stop.
    #[must_use]
    pub fn css(&self, palette: &ThemePalette) -> String {
        let mut out = format!("linear-gradient({}", self.direction.css());
        for stop in &self.stops {
            out.push_str(", ");
            out.push_str(&stop.color.css(palette));
            if let Some(pos) = stop.position.filter(|p| *p > 0) {
                let _ = write!(out, " {pos}%");
            }
        }
        out.push(')');
        out
    }
}

/// The stock gradients, by name, in projection order.
#[must_use]
pub fn default_gradients() -> Vec<(&'static str, Gradient)> {
    use StopColor::{Rgba, Tinted, Var};

    let p = ColorPath::Primary;
    let a = ColorPath::Accent;
    let n = ColorPath::Neutral;
    let white = Rgb::WHITE;
    let black = Rgb::BLACK;

    let linear = |deg: u16, stops: &[(StopColor, u8)]| Gradient {
        direction: GradientDirection::Angle(deg),
        stops: stops.iter().map(|&(color, pos)| GradientStop::at(color, pos)).collect(),
    };

    vec![
        ("hero", linear(135, &[(Var(p(Step::S900)), 0), (Var(p(Step::S700)), 50), (Var(a(Accent::Purple)), 100)])),
        ("heroOverlay", linear(135, &[(Tinted(p(Step::S900), 0.9), 0), (Tinted(p(Step::S700), 0.7), 100)])),
        ("card", linear(145, &[(Rgba(white, 0.1), 0), (Rgba(white, 0.05), 100)])),
        ("cardHover", linear(145, &[(Tinted(a(Accent::Cyan), 0.1), 0), (Tinted(a(Accent::Purple), 0.1), 100)])),
        ("cardDark", linear(145, &[(Rgba(black, 0.2), 0), (Rgba(black, 0.1), 100)])),
        ("primary", linear(135, &[(Var(a(Accent::Cyan)), 0), (Var(a(Accent::Purple)), 100)])),
        ("secondary", linear(135, &[(Var(p(Step::S700)), 0), (Var(p(Step::S500)), 100)])),
        (
            "success",
            linear(135, &[(Var(ColorPath::Semantic(Semantic::Success)), 0), (Var(a(Accent::Green)), 100)]),
        ),
        ("backgroundLight", linear(135, &[(Var(n(Step::S50)), 0), (Var(n(Step::S100)), 100)])),
        ("backgroundDark", linear(135, &[(Var(n(Step::S900)), 0), (Var(n(Step::S800)), 100)])),
        ("cyan", linear(135, &[(Var(a(Accent::Cyan)), 0), (Tinted(a(Accent::Cyan), 0.7), 100)])),
        ("purple", linear(135, &[(Var(a(Accent::Purple)), 0), (Tinted(a(Accent::Purple), 0.7), 100)])),
        (
            "mesh1",
            linear(
                135,
                &[
                    (Var(p(Step::S900)), 0),
                    (Var(a(Accent::Purple)), 25),
                    (Var(a(Accent::Cyan)), 50),
                    (Var(p(Step::S700)), 75),
                    (Var(p(Step::S900)), 100),
                ],
            ),
        ),
        (
            "mesh2",
            linear(
                45,
                &[
                    (Var(a(Accent::Cyan)), 0),
                    (Var(p(Step::S500)), 30),
                    (Var(a(Accent::Purple)), 60),
                    (Var(p(Step::S900)), 100),
                ],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::default_palette;
    use crate::palette::PalettePatch;
    use pretty_assertions::assert_eq;

    fn named(name: &str) -> Gradient {
        default_gradients()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, g)| g)
            .unwrap()
    }

    #[test]
    fn hero_renders_with_vars() {
        assert_eq!(
            named("hero").css(&default_palette()),
            "linear-gradient(135deg, var(--color-primary-900), var(--color-primary-700) 50%, var(--color-accent-purple) 100%)"
        );
    }

    #[test]
    fn tinted_stops_follow_the_palette() {
        let palette = default_palette();
        assert_eq!(
            named("heroOverlay").css(&palette),
            "linear-gradient(135deg, rgba(10, 14, 39, 0.9), rgba(30, 58, 138, 0.7) 100%)"
        );

        let patched = palette.merged(&PalettePatch::new().with(ColorPath::Primary(Step::S900), "#000000"));
        assert!(named("heroOverlay").css(&patched).starts_with("linear-gradient(135deg, rgba(0, 0, 0, 0.9)"));
    }

    #[test]
    fn malformed_tint_degrades_to_var() {
        let palette = default_palette()
            .merged(&PalettePatch::new().with(ColorPath::Accent(Accent::Cyan), "cyan-ish"));
        let css = named("cyan").css(&palette);
        assert_eq!(css, "linear-gradient(135deg, var(--color-accent-cyan), var(--color-accent-cyan) 100%)");
    }

    #[test]
    fn named_directions() {
        let g = Gradient {
            direction: GradientDirection::ToBottomRight,
            stops: vec![
                GradientStop { color: StopColor::Rgba(Rgb::WHITE, 1.0), position: None },
                GradientStop::at(StopColor::Rgba(Rgb::BLACK, 0.5), 80),
            ],
        };
        assert_eq!(
            g.css(&default_palette()),
            "linear-gradient(to bottom right, rgba(255, 255, 255, 1), rgba(0, 0, 0, 0.5) 80%)"
        );
        assert_eq!(GradientDirection::ToTop.css(), "to top");
        assert_eq!(GradientDirection::Angle(45).css(), "45deg");
    }

    #[test]
    fn fourteen_stock_gradients() {
        let names: Vec<&str> = default_gradients().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names.len(), 14);
        assert_eq!(names.first(), Some(&"hero"));
        assert_eq!(names.last(), Some(&"mesh2"));
    }
}
