//! The record a finished or abandoned session hands to its owner.
//!
//! The session itself is never persisted. When the brew ends, the owner turns
//! it into a [`BrewSummary`] and passes that to whatever stores brew logs.

use crate::recipe::types::brew_ratio;
use crate::recipe::Scale;
use crate::session::BrewSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

pub mod error;

pub use error::SummaryError;

/// Version identifier for the summary format
pub const SUMMARY_VERSION: u32 = 1;

/// How the session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrewOutcome {
    Completed,
    Cancelled,
}

/// Serializable outcome of one brewing attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrewSummary {
    /// Summary format version
    pub version: u32,

    pub session_id: Uuid,

    pub recipe_id: Option<String>,

    pub recipe_name: String,

    pub scale: Scale,

    /// Scaled coffee dose, grams
    pub coffee_grams: f64,

    /// Scaled water volume, ml
    pub water_ml: f64,

    /// Water per gram of coffee
    pub ratio: Option<f64>,

    /// Seconds actually counted down
    pub total_elapsed_secs: u32,

    /// Steps whose countdown ran out or was skipped past
    pub steps_completed: usize,

    pub step_count: usize,

    pub outcome: BrewOutcome,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

impl BrewSummary {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SummaryError> {
        serde_json::to_string(self).map_err(|e| SummaryError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON, rejecting other format versions.
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        let summary: Self = serde_json::from_str(json)
            .map_err(|e| SummaryError::DeserializationFailed(e.to_string()))?;
        summary.check_version()
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SummaryError> {
        bincode::serialize(self).map_err(|e| SummaryError::SerializationFailed(e.to_string()))
    }

    /// Decode from bytes, rejecting other format versions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SummaryError> {
        let summary: Self = bincode::deserialize(bytes)
            .map_err(|e| SummaryError::DeserializationFailed(e.to_string()))?;
        summary.check_version()
    }

    fn check_version(self) -> Result<Self, SummaryError> {
        if self.version == SUMMARY_VERSION {
            Ok(self)
        } else {
            Err(SummaryError::UnsupportedVersion {
                found: self.version,
                supported: SUMMARY_VERSION,
            })
        }
    }

    /// Whether the brew reached its last step.
    pub fn is_completed(&self) -> bool {
        self.outcome == BrewOutcome::Completed
    }
}

impl BrewSession {
    /// Describe the session as it stands, ending with `outcome`.
    pub fn summary(&self, outcome: BrewOutcome) -> BrewSummary {
        let step_count = self.recipe().steps.len();
        let steps_completed = if self.is_complete() {
            step_count
        } else {
            self.current_step_index()
        };

        BrewSummary {
            version: SUMMARY_VERSION,
            session_id: self.id(),
            recipe_id: self.recipe().id.clone(),
            recipe_name: self.recipe().name.clone(),
            scale: self.scale(),
            coffee_grams: self.scaled_coffee(),
            water_ml: self.scaled_water(),
            ratio: brew_ratio(self.scaled_coffee(), self.scaled_water()),
            total_elapsed_secs: self.total_elapsed(),
            steps_completed,
            step_count,
            outcome,
            started_at: self.started_at(),
            finished_at: Utc::now(),
        }
    }

    /// Consume the session, reporting it as completed if it is, cancelled
    /// otherwise.
    pub fn finish(self) -> BrewSummary {
        let outcome = if self.is_complete() {
            BrewOutcome::Completed
        } else {
            BrewOutcome::Cancelled
        };
        let summary = self.summary(outcome);
        info!(session = %summary.session_id, ?outcome, "brew session finished");
        summary
    }

    /// Consume the session as abandoned by the user.
    pub fn cancel(self) -> BrewSummary {
        let summary = self.summary(BrewOutcome::Cancelled);
        info!(
            session = %summary.session_id,
            step = self.current_step_index(),
            "brew session cancelled"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{RecipeBuilder, StepBuilder};

    fn session() -> BrewSession {
        let recipe = RecipeBuilder::new()
            .id("chemex-1")
            .name("Chemex")
            .coffee(30.0)
            .water(500.0)
            .step(StepBuilder::bloom(2, 60.0))
            .step(StepBuilder::pour(3, 440.0, 500.0))
            .step(StepBuilder::finish())
            .build()
            .unwrap();
        BrewSession::start(recipe, 1.5).unwrap()
    }

    #[test]
    fn finish_reports_completed_brew() {
        let mut s = session();
        while !s.is_complete() {
            s.tick();
        }
        let summary = s.finish();

        assert!(summary.is_completed());
        assert_eq!(summary.recipe_id.as_deref(), Some("chemex-1"));
        assert_eq!(summary.coffee_grams, 45.0);
        assert_eq!(summary.water_ml, 750.0);
        assert_eq!(summary.ratio, Some(16.7));
        assert_eq!(summary.total_elapsed_secs, 5);
        assert_eq!(summary.steps_completed, 3);
        assert_eq!(summary.step_count, 3);
        assert!(summary.finished_at >= summary.started_at);
    }

    #[test]
    fn finish_on_unfinished_session_is_a_cancel() {
        let mut s = session();
        s.tick();
        assert_eq!(s.finish().outcome, BrewOutcome::Cancelled);
    }

    #[test]
    fn cancel_counts_steps_left_behind() {
        let mut s = session();
        s.next_step();
        let summary = s.cancel();

        assert_eq!(summary.outcome, BrewOutcome::Cancelled);
        assert_eq!(summary.steps_completed, 1);
        assert_eq!(summary.total_elapsed_secs, 0);
    }

    #[test]
    fn json_round_trip_preserves_summary() {
        let summary = session().cancel();
        let json = summary.to_json().unwrap();

        assert!(json.contains("\"outcome\":\"cancelled\""));
        assert_eq!(BrewSummary::from_json(&json).unwrap(), summary);
    }

    #[test]
    fn binary_round_trip_preserves_summary() {
        let summary = session().cancel();
        let bytes = summary.to_bytes().unwrap();
        assert_eq!(BrewSummary::from_bytes(&bytes).unwrap(), summary);
    }

    #[test]
    fn newer_version_is_rejected() {
        let mut summary = session().cancel();
        summary.version = SUMMARY_VERSION + 1;
        let json = summary.to_json().unwrap();

        assert!(matches!(
            BrewSummary::from_json(&json),
            Err(SummaryError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            BrewSummary::from_json("{not json"),
            Err(SummaryError::DeserializationFailed(_))
        ));
        assert!(matches!(
            BrewSummary::from_bytes(&[1, 2, 3]),
            Err(SummaryError::DeserializationFailed(_))
        ));
    }
}
