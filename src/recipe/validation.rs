//! Recipe validation using `Validation`.
//!
//! A malformed recipe is an upstream data bug, and the person fixing it wants
//! the whole list of problems rather than the first one. Every check runs and
//! every violation is reported.

use crate::recipe::types::BrewRecipe;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found in a recipe.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecipeViolation {
    #[error("Recipe has no steps")]
    NoSteps,

    #[error("Recipe name is empty")]
    EmptyName,

    #[error("Recipe {field} must be a positive number (got {value})")]
    NonPositiveAmount { field: &'static str, value: f64 },

    #[error("Step at position {position} has an empty id")]
    EmptyStepId { position: usize },

    #[error("Step id '{id}' appears more than once")]
    DuplicateStepId { id: String },

    #[error("Step '{step_id}' has an invalid {field} ({value})")]
    InvalidStepAmount {
        step_id: String,
        field: &'static str,
        value: f64,
    },
}

type Check = Validation<(), NonEmptyVec<RecipeViolation>>;

/// Run every check, accumulating ALL violations.
///
/// # Example
///
/// ```rust
/// use pourover::recipe::{validate_recipe, BrewRecipe, RecipeViolation};
/// use stillwater::validation::Validation;
///
/// let recipe = BrewRecipe {
///     id: None,
///     name: String::new(),
///     coffee_amount: 0.0,
///     water_amount: 250.0,
///     steps: vec![],
/// };
///
/// match validate_recipe(&recipe) {
///     Validation::Failure(errors) => assert_eq!(errors.len(), 3),
///     Validation::Success(_) => panic!("expected violations"),
/// }
/// ```
pub fn validate_recipe(recipe: &BrewRecipe) -> Check {
    let mut checks: Vec<Check> = vec![
        check_has_steps(recipe),
        check_name(recipe),
        check_positive("coffeeAmount", recipe.coffee_amount),
        check_positive("waterAmount", recipe.water_amount),
    ];
    checks.extend(check_step_ids(recipe));
    checks.extend(check_step_amounts(recipe));

    Validation::all_vec(checks).map(|_| ())
}

/// Convenience wrapper returning the violations as a plain list.
pub fn recipe_violations(recipe: &BrewRecipe) -> Vec<RecipeViolation> {
    match validate_recipe(recipe) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

fn check_has_steps(recipe: &BrewRecipe) -> Check {
    if recipe.steps.is_empty() {
        Validation::fail(RecipeViolation::NoSteps)
    } else {
        Validation::success(())
    }
}

fn check_name(recipe: &BrewRecipe) -> Check {
    if recipe.name.trim().is_empty() {
        Validation::fail(RecipeViolation::EmptyName)
    } else {
        Validation::success(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Check {
    if value.is_finite() && value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(RecipeViolation::NonPositiveAmount { field, value })
    }
}

fn check_step_ids(recipe: &BrewRecipe) -> Vec<Check> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut checks = Vec::new();

    for (position, step) in recipe.steps.iter().enumerate() {
        if step.id.trim().is_empty() {
            checks.push(Validation::fail(RecipeViolation::EmptyStepId { position }));
            continue;
        }
        if !seen.insert(step.id.as_str()) && reported.insert(step.id.as_str()) {
            checks.push(Validation::fail(RecipeViolation::DuplicateStepId {
                id: step.id.clone(),
            }));
        }
    }

    checks
}

fn check_step_amounts(recipe: &BrewRecipe) -> Vec<Check> {
    let mut checks = Vec::new();

    for step in &recipe.steps {
        let amounts = [
            ("pourAmount", step.pour_amount),
            ("targetWeight", step.target_weight),
        ];
        for (field, amount) in amounts {
            if let Some(value) = amount {
                if !value.is_finite() || value < 0.0 {
                    checks.push(Validation::fail(RecipeViolation::InvalidStepAmount {
                        step_id: step.id.clone(),
                        field,
                        value,
                    }));
                }
            }
        }
    }

    checks
}
