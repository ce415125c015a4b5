//! Recipe data types.
//!
//! These mirror the JSON shape served by the recipe API, so a response body
//! deserializes straight into a [`BrewRecipe`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of brewing step.
///
/// Only used for display and sound selection; the session never branches on it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Bloom,
    Pour,
    Wait,
    Stir,
    Press,
    Finish,
}

impl StepType {
    /// Lowercase wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bloom => "bloom",
            Self::Pour => "pour",
            Self::Wait => "wait",
            Self::Stir => "stir",
            Self::Press => "press",
            Self::Finish => "finish",
        }
    }

    /// Whether the step involves adding water.
    pub fn adds_water(&self) -> bool {
        matches!(self, Self::Bloom | Self::Pour)
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timed instruction within a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewStep {
    /// Unique within the owning recipe
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    /// Countdown length in seconds; zero means the step has no countdown
    pub duration: u32,
    pub instruction: String,
    /// Water to pour during this step, ml, unscaled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pour_amount: Option<f64>,
    /// Scale reading to aim for by the end of this step, grams, unscaled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
}

/// An ordered sequence of timed steps for one brew method.
///
/// # Example
///
/// ```rust
/// use pourover::recipe::BrewRecipe;
///
/// let json = r#"{
///     "id": "v60-classic",
///     "name": "V60 Classic",
///     "coffeeAmount": 15,
///     "waterAmount": 250,
///     "steps": [
///         {"id": "1", "type": "bloom", "duration": 45, "instruction": "Bloom", "pourAmount": 50},
///         {"id": "2", "type": "finish", "duration": 0, "instruction": "Enjoy"}
///     ]
/// }"#;
///
/// let recipe: BrewRecipe = serde_json::from_str(json).unwrap();
/// assert_eq!(recipe.steps.len(), 2);
/// assert_eq!(recipe.total_duration(), 45);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Grams, unscaled
    pub coffee_amount: f64,
    /// Millilitres, unscaled
    pub water_amount: f64,
    pub steps: Vec<BrewStep>,
}

impl BrewRecipe {
    /// Sum of all step durations, in seconds. Saturates at `u32::MAX`.
    pub fn total_duration(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| s.duration)
            .fold(0, u32::saturating_add)
    }

    /// Water-to-coffee ratio, e.g. `16.7` for a 1:16.7 brew.
    ///
    /// Returns `None` when the coffee amount is not positive.
    pub fn ratio(&self) -> Option<f64> {
        brew_ratio(self.coffee_amount, self.water_amount)
    }

    /// Step at `index`, if any.
    pub fn step(&self, index: usize) -> Option<&BrewStep> {
        self.steps.get(index)
    }

    /// Index of the final step.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Water per gram of coffee, rounded to one decimal.
pub(crate) fn brew_ratio(coffee: f64, water: f64) -> Option<f64> {
    if coffee > 0.0 && coffee.is_finite() && water.is_finite() {
        Some((water / coffee * 10.0).round() / 10.0)
    } else {
        None
    }
}
