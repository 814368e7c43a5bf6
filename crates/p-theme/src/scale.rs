//! Color scales — eleven lightness steps of a single hue.
//!
//! Steps run from `50` (near-white) to `950` (near-black). Every scale holds
//! all eleven; there is no way to build one with a step missing, and a
//! stored snapshot with a missing step fails to deserialize rather than
//! producing a partial scale. Monotonic lightness is a design convention
//! only and is not checked.

use std::fmt;
use std::str::FromStr;

use p_color::ColorToken;
use serde::{Deserialize, Serialize};

use crate::ThemeError;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One step of a [`ColorScale`], lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Step {
    #[serde(rename = "50")]
    S50,
    #[serde(rename = "100")]
    S100,
    #[serde(rename = "200")]
    S200,
    #[serde(rename = "300")]
    S300,
    #[serde(rename = "400")]
    S400,
    #[serde(rename = "500")]
    S500,
    #[serde(rename = "600")]
    S600,
    #[serde(rename = "700")]
    S700,
    #[serde(rename = "800")]
    S800,
    #[serde(rename = "900")]
    S900,
    #[serde(rename = "950")]
    S950,
}

impl Step {
    /// All steps in ascending order.
    pub const ALL: [Self; 11] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
        Self::S950,
    ];

    /// The step's name as it appears in CSS property names and JSON keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S50 => "50",
            Self::S100 => "100",
            Self::S200 => "200",
            Self::S300 => "300",
            Self::S400 => "400",
            Self::S500 => "500",
            Self::S600 => "600",
            Self::S700 => "700",
            Self::S800 => "800",
            Self::S900 => "900",
            Self::S950 => "950",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| ThemeError::UnknownColorPath(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ColorScale
// ---------------------------------------------------------------------------

/// An 11-step color scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    #[serde(rename = "50")]
    s50: ColorToken,
    #[serde(rename = "100")]
    s100: ColorToken,
    #[serde(rename = "200")]
    s200: ColorToken,
    #[serde(rename = "300")]
    s300: ColorToken,
    #[serde(rename = "400")]
    s400: ColorToken,
    #[serde(rename = "500")]
    s500: ColorToken,
    #[serde(rename = "600")]
    s600: ColorToken,
    #[serde(rename = "700")]
    s700: ColorToken,
    #[serde(rename = "800")]
    s800: ColorToken,
    #[serde(rename = "900")]
    s900: ColorToken,
    #[serde(rename = "950")]
    s950: ColorToken,
}

impl ColorScale {
    /// Build a scale by asking `f` for each step in ascending order.
    pub fn from_fn(mut f: impl FnMut(Step) -> ColorToken) -> Self {
        Self {
            s50: f(Step::S50),
            s100: f(Step::S100),
            s200: f(Step::S200),
            s300: f(Step::S300),
            s400: f(Step::S400),
            s500: f(Step::S500),
            s600: f(Step::S600),
            s700: f(Step::S700),
            s800: f(Step::S800),
            s900: f(Step::S900),
            s950: f(Step::S950),
        }
    }

    /// Build a scale from eleven hex strings, lightest first.
    #[must_use]
    pub fn from_hexes(hexes: [&str; 11]) -> Self {
        let mut it = hexes.into_iter();
        Self::from_fn(|_| it.next().map(ColorToken::from).unwrap_or_else(ColorToken::black))
    }

    #[must_use]
    pub const fn get(&self, step: Step) -> &ColorToken {
        match step {
            Step::S50 => &self.s50,
            Step::S100 => &self.s100,
            Step::S200 => &self.s200,
            Step::S300 => &self.s300,
            Step::S400 => &self.s400,
            Step::S500 => &self.s500,
            Step::S600 => &self.s600,
            Step::S700 => &self.s700,
            Step::S800 => &self.s800,
            Step::S900 => &self.s900,
            Step::S950 => &self.s950,
        }
    }

    pub fn set(&mut self, step: Step, token: ColorToken) {
        let slot = match step {
            Step::S50 => &mut self.s50,
            Step::S100 => &mut self.s100,
            Step::S200 => &mut self.s200,
            Step::S300 => &mut self.s300,
            Step::S400 => &mut self.s400,
            Step::S500 => &mut self.s500,
            Step::S600 => &mut self.s600,
            Step::S700 => &mut self.s700,
            Step::S800 => &mut self.s800,
            Step::S900 => &mut self.s900,
            Step::S950 => &mut self.s950,
        };
        *slot = token;
    }

    /// Iterate `(step, token)` pairs, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (Step, &ColorToken)> + '_ {
        Step::ALL.into_iter().map(move |step| (step, self.get(step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ColorScale {
        ColorScale::from_fn(|step| ColorToken::new(format!("#0000{:02}", step as usize)))
    }

    #[test]
    fn step_names_roundtrip() {
        for step in Step::ALL {
            assert_eq!(step.as_str().parse::<Step>().unwrap(), step);
        }
    }

    #[test]
    fn unknown_step_is_rejected() {
        assert!("1000".parse::<Step>().is_err());
        assert!("S50".parse::<Step>().is_err());
    }

    #[test]
    fn steps_are_ordered() {
        assert!(Step::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn set_replaces_one_step() {
        let mut scale = sample();
        scale.set(Step::S900, ColorToken::from("#123456"));
        assert_eq!(scale.get(Step::S900).as_str(), "#123456");
        assert_eq!(scale.get(Step::S950).as_str(), "#000010");
    }

    #[test]
    fn iter_visits_all_steps_in_order() {
        let scale = sample();
        let steps: Vec<Step> = scale.iter().map(|(s, _)| s).collect();
        assert_eq!(steps, Step::ALL.to_vec());
    }

    #[test]
    fn serializes_with_step_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["50"], "#000000");
        assert_eq!(json["950"], "#000010");
        assert_eq!(json.as_object().unwrap().len(), 11);
    }

    #[test]
    fn missing_step_fails_to_deserialize() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json.as_object_mut().unwrap().remove("500");
        assert!(serde_json::from_value::<ColorScale>(json).is_err());
    }
}
