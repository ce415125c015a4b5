//! Read-only values derived from session state.
//!
//! Nothing here is stored; every value is recomputed from the session's
//! fields on each call so a render can never disagree with the state.

use crate::core::BrewPhase;
use crate::recipe::{BrewStep, StepType};
use crate::session::machine::BrewSession;
use serde::{Deserialize, Serialize};

/// A recipe step with its amounts scaled for the current batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaledStep {
    pub id: String,
    pub step_type: StepType,
    pub duration: u32,
    pub instruction: String,
    pub pour_amount: Option<f64>,
    pub target_weight: Option<f64>,
}

/// Everything a timer screen needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: BrewPhase,
    pub step_index: usize,
    pub step_count: usize,
    pub step: ScaledStep,
    pub next_step: Option<ScaledStep>,
    pub step_time_remaining: u32,
    pub step_progress_percent: f64,
    pub overall_progress_percent: f64,
    pub total_elapsed: u32,
    /// `m:ss` rendering of `step_time_remaining`
    pub clock: String,
    pub scaled_coffee: f64,
    pub scaled_water: f64,
}

impl BrewSession {
    /// Current lifecycle phase.
    pub fn phase(&self) -> BrewPhase {
        BrewPhase::from_flags(self.is_running(), self.is_paused(), self.is_complete())
    }

    /// Whether the current step is the recipe's last.
    pub fn is_last_step(&self) -> bool {
        self.current_step_index() == self.recipe().last_index()
    }

    /// Last step reached with nothing left on the countdown.
    pub fn is_complete(&self) -> bool {
        self.is_last_step() && self.step_time_remaining() == 0
    }

    /// The step being shown.
    pub fn current_step(&self) -> &BrewStep {
        &self.recipe().steps[self.current_step_index()]
    }

    /// The step that follows the current one, for an "up next" line.
    pub fn upcoming_step(&self) -> Option<&BrewStep> {
        self.recipe().step(self.current_step_index() + 1)
    }

    /// How far through the current step's countdown we are, 0-100.
    ///
    /// A zero-duration step counts as fully done.
    pub fn step_progress_percent(&self) -> f64 {
        let duration = self.current_step().duration;
        if duration == 0 {
            return 100.0;
        }
        f64::from(duration - self.step_time_remaining()) * 100.0 / f64::from(duration)
    }

    /// Elapsed time against the recipe's total planned duration, 0-100.
    ///
    /// Capped at 100 because going back to a step adds time the plan
    /// never accounted for.
    pub fn overall_progress_percent(&self) -> f64 {
        let total = self.recipe().total_duration();
        if total == 0 {
            return 100.0;
        }
        (f64::from(self.total_elapsed()) * 100.0 / f64::from(total)).min(100.0)
    }

    /// Seconds left on the current step plus every step after it.
    /// Saturates at `u32::MAX`.
    pub fn time_remaining_total(&self) -> u32 {
        self.recipe().steps[self.current_step_index() + 1..]
            .iter()
            .map(|s| s.duration)
            .fold(self.step_time_remaining(), u32::saturating_add)
    }

    /// Scaled pour amount of the step at `index`.
    pub fn scaled_pour_amount(&self, index: usize) -> Option<f64> {
        let step = self.recipe().step(index)?;
        self.scale().amount(step.pour_amount)
    }

    /// Scaled target weight of the step at `index`.
    pub fn scaled_target_weight(&self, index: usize) -> Option<f64> {
        let step = self.recipe().step(index)?;
        self.scale().amount(step.target_weight)
    }

    /// Step at `index` with its amounts scaled for this batch.
    pub fn scaled_step(&self, index: usize) -> Option<ScaledStep> {
        self.recipe().step(index).map(|step| self.scale_step(step))
    }

    fn scale_step(&self, step: &BrewStep) -> ScaledStep {
        ScaledStep {
            id: step.id.clone(),
            step_type: step.step_type,
            duration: step.duration,
            instruction: step.instruction.clone(),
            pour_amount: self.scale().amount(step.pour_amount),
            target_weight: self.scale().amount(step.target_weight),
        }
    }

    /// All derived values for one frame of a timer screen.
    pub fn snapshot(&self) -> SessionSnapshot {
        let index = self.current_step_index();

        SessionSnapshot {
            phase: self.phase(),
            step_index: index,
            step_count: self.recipe().steps.len(),
            step: self.scale_step(self.current_step()),
            next_step: self.scaled_step(index + 1),
            step_time_remaining: self.step_time_remaining(),
            step_progress_percent: self.step_progress_percent(),
            overall_progress_percent: self.overall_progress_percent(),
            total_elapsed: self.total_elapsed(),
            clock: format_clock(self.step_time_remaining()),
            scaled_coffee: self.scaled_coffee(),
            scaled_water: self.scaled_water(),
        }
    }
}

/// Render seconds as `m:ss`, e.g. `125` as `2:05`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{RecipeBuilder, StepBuilder};

    fn session(scale: f64) -> BrewSession {
        let recipe = RecipeBuilder::new()
            .name("V60")
            .coffee(15.0)
            .water(250.0)
            .step(StepBuilder::bloom(40, 45.0).target_weight(45.0))
            .step(StepBuilder::pour(60, 205.0, 250.0))
            .step(StepBuilder::finish())
            .build()
            .unwrap();
        BrewSession::start(recipe, scale).unwrap()
    }

    #[test]
    fn step_progress_tracks_countdown() {
        let mut s = session(1.0);
        assert_eq!(s.step_progress_percent(), 0.0);
        for _ in 0..10 {
            s.tick();
        }
        assert_eq!(s.step_progress_percent(), 25.0);
    }

    #[test]
    fn zero_duration_step_reports_full_progress() {
        let mut s = session(1.0);
        s.next_step();
        s.next_step();
        assert_eq!(s.step_progress_percent(), 100.0);
        assert!(s.is_complete());
    }

    #[test]
    fn overall_progress_is_capped() {
        let mut s = session(1.0);
        assert_eq!(s.overall_progress_percent(), 0.0);
        for _ in 0..50 {
            s.tick();
        }
        // 40 counted, one advancing tick, 9 more counted
        assert_eq!(s.total_elapsed(), 49);
        assert_eq!(s.overall_progress_percent(), 49.0);

        s.prev_step();
        for _ in 0..80 {
            s.tick();
        }
        assert_eq!(s.overall_progress_percent(), 100.0);
    }

    #[test]
    fn scaled_amounts_are_rounded() {
        let s = session(1.5);
        assert_eq!(s.scaled_pour_amount(0), Some(68.0)); // 67.5
        assert_eq!(s.scaled_target_weight(0), Some(68.0));
        assert_eq!(s.scaled_pour_amount(1), Some(308.0)); // 307.5
        assert_eq!(s.scaled_target_weight(1), Some(375.0));
        assert_eq!(s.scaled_pour_amount(2), None);
        assert_eq!(s.scaled_pour_amount(9), None);
    }

    #[test]
    fn time_remaining_total_includes_later_steps() {
        let mut s = session(1.0);
        assert_eq!(s.time_remaining_total(), 100);
        s.tick();
        assert_eq!(s.time_remaining_total(), 99);
        s.next_step();
        assert_eq!(s.time_remaining_total(), 60);
    }

    #[test]
    fn huge_durations_saturate_instead_of_overflowing() {
        let recipe = RecipeBuilder::new()
            .name("Endless")
            .coffee(15.0)
            .water(250.0)
            .step(StepBuilder::wait(u32::MAX))
            .step(StepBuilder::wait(u32::MAX))
            .build()
            .unwrap();
        let mut s = BrewSession::start(recipe, 1.0).unwrap();

        assert_eq!(s.time_remaining_total(), u32::MAX);
        assert_eq!(s.overall_progress_percent(), 0.0);
        s.tick();
        assert_eq!(s.time_remaining_total(), u32::MAX);

        let snap = s.snapshot();
        assert_eq!(snap.step_time_remaining, u32::MAX - 1);
        assert!(snap.overall_progress_percent > 0.0);
        assert!(snap.overall_progress_percent < 1.0);
    }

    #[test]
    fn upcoming_step_is_none_on_last_step() {
        let mut s = session(1.0);
        assert_eq!(s.upcoming_step().map(|st| st.id.as_str()), Some("2"));
        s.next_step();
        s.next_step();
        assert!(s.upcoming_step().is_none());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut s = session(2.0);
        for _ in 0..5 {
            s.tick();
        }
        let snap = s.snapshot();

        assert_eq!(snap.phase, BrewPhase::Running);
        assert_eq!(snap.step_index, 0);
        assert_eq!(snap.step_count, 3);
        assert_eq!(snap.step.pour_amount, Some(90.0));
        assert_eq!(snap.next_step.as_ref().map(|n| n.step_type), Some(StepType::Pour));
        assert_eq!(snap.step_time_remaining, 35);
        assert_eq!(snap.clock, "0:35");
        assert_eq!(snap.scaled_coffee, 30.0);
        assert_eq!(snap.scaled_water, 500.0);
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(125), "2:05");
        assert_eq!(format_clock(3600), "60:00");
    }
}
