//! Build errors for recipe and step builders.

use crate::recipe::validation::RecipeViolation;
use thiserror::Error;

/// Errors that can occur when building recipes and steps.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Recipe name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Coffee amount not specified. Call .coffee(grams)")]
    MissingCoffee,

    #[error("Water amount not specified. Call .water(ml)")]
    MissingWater,

    #[error("Step type not specified. Call .kind(step_type) or use a typed constructor")]
    MissingStepType,

    #[error("Step instruction not specified. Call .instruction(text)")]
    MissingInstruction,

    #[error("Recipe failed validation: {}", format_violations(.0))]
    Invalid(Vec<RecipeViolation>),
}

pub(crate) fn format_violations(violations: &[RecipeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
