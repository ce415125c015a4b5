//! The brew session state machine.

use crate::config::{AdvancePolicy, SessionConfig};
use crate::core::{ChangeCause, StepChange, StepHistory};
use crate::recipe::{recipe_violations, BrewRecipe, Scale};
use crate::session::error::SessionError;
use crate::session::outcome::TickOutcome;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Progress through the timed steps of one brewing attempt.
///
/// Owned by whoever started it and driven by a one-second interval the owner
/// controls. Every operation is synchronous and infallible; the only failure
/// point is construction.
///
/// Invariants held in every reachable state:
/// - `current_step_index < steps.len()`
/// - `step_time_remaining <= steps[current_step_index].duration`
///
/// # Example
///
/// ```rust
/// use pourover::recipe::{RecipeBuilder, StepBuilder};
/// use pourover::session::BrewSession;
///
/// let recipe = RecipeBuilder::new()
///     .name("Quick bloom")
///     .coffee(15.0)
///     .water(250.0)
///     .step(StepBuilder::bloom(2, 50.0))
///     .step(StepBuilder::finish())
///     .build()
///     .unwrap();
///
/// let mut session = BrewSession::start(recipe, 1.5).unwrap();
/// assert_eq!(session.scaled_coffee(), 22.5);
/// assert_eq!(session.scaled_water(), 375.0);
///
/// session.tick();
/// session.tick();
/// assert_eq!(session.step_time_remaining(), 0);
/// assert!(!session.is_complete());
///
/// session.tick(); // moves on to the zero-length finish step
/// assert!(session.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct BrewSession {
    id: Uuid,
    recipe: Arc<BrewRecipe>,
    scale: Scale,
    scaled_coffee: f64,
    scaled_water: f64,
    current_step_index: usize,
    step_time_remaining: u32,
    total_elapsed: u32,
    is_running: bool,
    is_paused: bool,
    config: SessionConfig,
    history: StepHistory,
    started_at: DateTime<Utc>,
}

impl BrewSession {
    /// Validate the inputs and create a running session at step 0.
    pub fn start(recipe: impl Into<Arc<BrewRecipe>>, scale: f64) -> Result<Self, SessionError> {
        Self::start_with_config(recipe, scale, SessionConfig::default())
    }

    /// [`start`](Self::start) with an explicit [`SessionConfig`].
    pub fn start_with_config(
        recipe: impl Into<Arc<BrewRecipe>>,
        scale: f64,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let mut session = Self::prepare_with_config(recipe, scale, config)?;
        session.is_running = true;
        info!(
            session = %session.id,
            recipe = %session.recipe.name,
            scale = %session.scale,
            "brew session started"
        );
        Ok(session)
    }

    /// Like [`start`](Self::start), but the session waits for `resume()`.
    pub fn prepare(recipe: impl Into<Arc<BrewRecipe>>, scale: f64) -> Result<Self, SessionError> {
        Self::prepare_with_config(recipe, scale, SessionConfig::default())
    }

    /// [`prepare`](Self::prepare) with an explicit [`SessionConfig`].
    pub fn prepare_with_config(
        recipe: impl Into<Arc<BrewRecipe>>,
        scale: f64,
        config: SessionConfig,
    ) -> Result<Self, SessionError> {
        let recipe = recipe.into();
        let violations = recipe_violations(&recipe);
        if !violations.is_empty() {
            return Err(SessionError::InvalidRecipe(violations));
        }
        let scale = Scale::new(scale)?;

        let step_time_remaining = recipe.steps[0].duration;
        Ok(Self {
            id: Uuid::new_v4(),
            scaled_coffee: scale.coffee(recipe.coffee_amount),
            scaled_water: scale.water(recipe.water_amount),
            recipe,
            scale,
            current_step_index: 0,
            step_time_remaining,
            total_elapsed: 0,
            is_running: false,
            is_paused: false,
            config,
            history: StepHistory::new(),
            started_at: Utc::now(),
        })
    }

    /// Advance the clock by one second.
    ///
    /// Must be called once per elapsed second while the session is running.
    /// Calling it at any other time is harmless and returns
    /// [`TickOutcome::Ignored`] or [`TickOutcome::Finished`].
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            trace!(session = %self.id, "tick ignored, session not running");
            return TickOutcome::Ignored;
        }
        if self.is_complete() {
            return TickOutcome::Finished;
        }

        if self.step_time_remaining > 0 {
            self.step_time_remaining -= 1;
            self.total_elapsed = self.total_elapsed.saturating_add(1);
            trace!(
                session = %self.id,
                step = self.current_step_index,
                remaining = self.step_time_remaining,
                "tick"
            );

            if self.step_time_remaining > 0 {
                return TickOutcome::Counted {
                    remaining: self.step_time_remaining,
                };
            }
            if self.is_last_step() {
                info!(session = %self.id, elapsed = self.total_elapsed, "brew complete");
                return TickOutcome::Completed;
            }
            if self.config.advance_policy == AdvancePolicy::ExtraTick {
                return TickOutcome::Counted { remaining: 0 };
            }
        }

        let from = self.current_step_index;
        self.auto_advance();
        let completed = self.is_complete();
        if completed {
            info!(session = %self.id, elapsed = self.total_elapsed, "brew complete");
        }

        TickOutcome::Advanced {
            from,
            to: self.current_step_index,
            completed,
        }
    }

    // Caller guarantees the current step is not the last one.
    fn auto_advance(&mut self) {
        loop {
            self.move_to(self.current_step_index + 1, ChangeCause::AutoAdvance);

            let skip_empty = self.config.advance_policy == AdvancePolicy::Immediate
                && self.step_time_remaining == 0
                && !self.is_last_step();
            if !skip_empty {
                break;
            }
        }
    }

    /// Stop ticking. Idempotent; does nothing unless the session is running.
    pub fn pause(&mut self) {
        if self.is_running {
            self.is_running = false;
            self.is_paused = true;
            debug!(session = %self.id, step = self.current_step_index, "paused");
        }
    }

    /// Start or continue ticking.
    pub fn resume(&mut self) {
        if !self.is_running {
            debug!(session = %self.id, step = self.current_step_index, "resumed");
        }
        self.is_running = true;
        self.is_paused = false;
    }

    /// Skip to the next step with its full countdown.
    ///
    /// Clamped: returns `false` and changes nothing on the last step.
    pub fn next_step(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.move_to(self.current_step_index + 1, ChangeCause::Next);
        true
    }

    /// Go back one step and restart its countdown from the top.
    ///
    /// Clamped: returns `false` and changes nothing on the first step.
    /// Elapsed time is not rewound.
    pub fn prev_step(&mut self) -> bool {
        if self.current_step_index == 0 {
            return false;
        }
        self.move_to(self.current_step_index - 1, ChangeCause::Previous);
        true
    }

    fn move_to(&mut self, index: usize, cause: ChangeCause) {
        let from = self.current_step_index;
        self.current_step_index = index;
        self.step_time_remaining = self.recipe.steps[index].duration;

        debug!(
            session = %self.id,
            from,
            to = index,
            ?cause,
            step_type = %self.recipe.steps[index].step_type,
            "step changed"
        );

        if self.config.record_history {
            self.history = self.history.record(StepChange {
                from,
                to: index,
                cause,
                elapsed: self.total_elapsed,
                timestamp: Utc::now(),
            });
        }
    }

    /// Unique id of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Recipe being brewed.
    pub fn recipe(&self) -> &BrewRecipe {
        &self.recipe
    }

    /// Shared handle to the recipe this session reads from.
    pub fn recipe_arc(&self) -> Arc<BrewRecipe> {
        Arc::clone(&self.recipe)
    }

    /// Validated batch multiplier.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Coffee dose for this batch, grams, one decimal.
    pub fn scaled_coffee(&self) -> f64 {
        self.scaled_coffee
    }

    /// Water for this batch, whole millilitres.
    pub fn scaled_water(&self) -> f64 {
        self.scaled_water
    }

    /// Index of the step being shown.
    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    /// Seconds left on the current step.
    pub fn step_time_remaining(&self) -> u32 {
        self.step_time_remaining
    }

    /// Seconds counted down so far.
    pub fn total_elapsed(&self) -> u32 {
        self.total_elapsed
    }

    /// Whether ticks are counted.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Whether the session was explicitly paused.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Behaviour settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Step changes so far, empty when history is disabled.
    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    /// When the session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
