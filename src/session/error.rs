//! Session construction errors.

use crate::recipe::error::format_violations;
use crate::recipe::{RecipeViolation, ScaleError};
use thiserror::Error;

/// Errors returned when a session cannot be started.
///
/// Only construction can fail. Once a session exists, every operation on it
/// is total.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] ScaleError),

    #[error("Invalid recipe: {}", format_violations(.0))]
    InvalidRecipe(Vec<RecipeViolation>),
}

impl SessionError {
    /// Whether the recipe was rejected for having no steps.
    pub fn is_empty_recipe(&self) -> bool {
        matches!(self, Self::InvalidRecipe(v) if v.contains(&RecipeViolation::NoSteps))
    }
}
