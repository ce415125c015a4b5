//! Brew recipes: the read-only input of a brew session.
//!
//! - Data types matching the recipe API's JSON shape
//! - The validated [`Scale`] factor and its rounding rules
//! - Accumulating recipe validation
//! - Fluent builders for recipes defined in code

pub mod builder;
pub mod error;
pub mod scale;
pub mod types;
pub mod validation;

pub use builder::{RecipeBuilder, StepBuilder};
pub use error::BuildError;
pub use scale::{Scale, ScaleError};
pub use types::{BrewRecipe, BrewStep, StepType};
pub use validation::{recipe_violations, validate_recipe, RecipeViolation};
