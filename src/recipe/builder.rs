//! Fluent builders for recipes and steps.

use crate::recipe::error::BuildError;
use crate::recipe::types::{BrewRecipe, BrewStep, StepType};
use crate::recipe::validation::recipe_violations;

/// Builder for a single [`BrewStep`].
///
/// Step ids default to the step's 1-based position when added to a
/// [`RecipeBuilder`] without an explicit id.
#[derive(Debug, Clone, Default)]
pub struct StepBuilder {
    id: Option<String>,
    step_type: Option<StepType>,
    duration: u32,
    instruction: Option<String>,
    pour_amount: Option<f64>,
    target_weight: Option<f64>,
}

impl StepBuilder {
    /// Empty step builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bloom step pouring `pour_ml` and waiting `secs`.
    pub fn bloom(secs: u32, pour_ml: f64) -> Self {
        Self::new()
            .kind(StepType::Bloom)
            .duration(secs)
            .pour_amount(pour_ml)
            .instruction(format!("Pour {pour_ml}ml to bloom the grounds"))
    }

    /// Pour step bringing the scale to `target_g`.
    pub fn pour(secs: u32, pour_ml: f64, target_g: f64) -> Self {
        Self::new()
            .kind(StepType::Pour)
            .duration(secs)
            .pour_amount(pour_ml)
            .target_weight(target_g)
            .instruction(format!("Pour slowly up to {target_g}g"))
    }

    /// Wait step.
    pub fn wait(secs: u32) -> Self {
        Self::new()
            .kind(StepType::Wait)
            .duration(secs)
            .instruction("Let it draw down")
    }

    /// Stir step.
    pub fn stir(secs: u32) -> Self {
        Self::new()
            .kind(StepType::Stir)
            .duration(secs)
            .instruction("Stir gently")
    }

    /// Press step.
    pub fn press(secs: u32) -> Self {
        Self::new()
            .kind(StepType::Press)
            .duration(secs)
            .instruction("Press down steadily")
    }

    /// Zero-duration closing step.
    pub fn finish() -> Self {
        Self::new()
            .kind(StepType::Finish)
            .instruction("Enjoy your coffee")
    }

    /// Set the step id. Defaults to the step's position.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the step type (required).
    pub fn kind(mut self, step_type: StepType) -> Self {
        self.step_type = Some(step_type);
        self
    }

    /// Set the countdown length in seconds.
    pub fn duration(mut self, secs: u32) -> Self {
        self.duration = secs;
        self
    }

    /// Set the instruction text (required).
    pub fn instruction(mut self, text: impl Into<String>) -> Self {
        self.instruction = Some(text.into());
        self
    }

    /// Water poured in this step, ml. Overrides a typed constructor's value.
    pub fn pour_amount(mut self, ml: f64) -> Self {
        self.pour_amount = Some(ml);
        self
    }

    /// Scale reading to hit by the end of the step, grams.
    pub fn target_weight(mut self, grams: f64) -> Self {
        self.target_weight = Some(grams);
        self
    }

    /// Build the step, using `fallback_id` when no id was set.
    pub fn build_with_id(self, fallback_id: impl Into<String>) -> Result<BrewStep, BuildError> {
        let step_type = self.step_type.ok_or(BuildError::MissingStepType)?;
        let instruction = self.instruction.ok_or(BuildError::MissingInstruction)?;

        Ok(BrewStep {
            id: self.id.unwrap_or_else(|| fallback_id.into()),
            step_type,
            duration: self.duration,
            instruction,
            pour_amount: self.pour_amount,
            target_weight: self.target_weight,
        })
    }
}

/// Builder for a [`BrewRecipe`] with a fluent API.
///
/// `build()` checks required fields first and then runs the full recipe
/// validation, so a built recipe is always accepted by
/// [`BrewSession::start`](crate::session::BrewSession::start) at any scale.
///
/// # Example
///
/// ```rust
/// use pourover::recipe::{RecipeBuilder, StepBuilder};
///
/// let recipe = RecipeBuilder::new()
///     .name("V60 Classic")
///     .coffee(15.0)
///     .water(250.0)
///     .step(StepBuilder::bloom(45, 50.0))
///     .step(StepBuilder::pour(60, 200.0, 250.0))
///     .step(StepBuilder::finish())
///     .build()
///     .unwrap();
///
/// assert_eq!(recipe.steps.len(), 3);
/// assert_eq!(recipe.steps[1].id, "2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecipeBuilder {
    id: Option<String>,
    name: Option<String>,
    coffee: Option<f64>,
    water: Option<f64>,
    steps: Vec<StepBuilder>,
}

impl RecipeBuilder {
    /// Empty recipe builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recipe id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the recipe name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the base coffee dose in grams (required).
    pub fn coffee(mut self, grams: f64) -> Self {
        self.coffee = Some(grams);
        self
    }

    /// Set the base water volume in millilitres (required).
    pub fn water(mut self, ml: f64) -> Self {
        self.water = Some(ml);
        self
    }

    /// Append one step.
    pub fn step(mut self, step: StepBuilder) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps.
    pub fn steps(mut self, steps: impl IntoIterator<Item = StepBuilder>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Assemble and validate the recipe.
    pub fn build(self) -> Result<BrewRecipe, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        let coffee_amount = self.coffee.ok_or(BuildError::MissingCoffee)?;
        let water_amount = self.water.ok_or(BuildError::MissingWater)?;

        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.build_with_id((i + 1).to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let recipe = BrewRecipe {
            id: self.id,
            name,
            coffee_amount,
            water_amount,
            steps,
        };

        let violations = recipe_violations(&recipe);
        if violations.is_empty() {
            Ok(recipe)
        } else {
            Err(BuildError::Invalid(violations))
        }
    }
}
