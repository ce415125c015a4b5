//! Step change history.
//!
//! Provides immutable tracking of the step changes a brew session went
//! through, so a caller can reconstruct how the brew actually unfolded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What caused a step change.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    /// The countdown ran out and the session moved on by itself.
    AutoAdvance,
    /// The user skipped forward.
    Next,
    /// The user went back.
    Previous,
}

/// Record of a single step change.
///
/// # Example
///
/// ```rust
/// use pourover::core::{ChangeCause, StepChange};
/// use chrono::Utc;
///
/// let change = StepChange {
///     from: 0,
///     to: 1,
///     cause: ChangeCause::AutoAdvance,
///     elapsed: 30,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.to, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepChange {
    /// Step index left
    pub from: usize,
    /// Step index entered
    pub to: usize,
    /// Why the change happened
    pub cause: ChangeCause,
    /// Session seconds elapsed when the change happened
    pub elapsed: u32,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of step changes.
///
/// History is immutable - `record` returns a new history with the change
/// appended and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use pourover::core::{ChangeCause, StepChange, StepHistory};
/// use chrono::Utc;
///
/// let history = StepHistory::new();
/// let history = history.record(StepChange {
///     from: 0,
///     to: 1,
///     cause: ChangeCause::AutoAdvance,
///     elapsed: 45,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StepChange {
///     from: 1,
///     to: 0,
///     cause: ChangeCause::Previous,
///     elapsed: 50,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![0, 1, 0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepHistory {
    changes: Vec<StepChange>,
}

impl StepHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    ///
    /// ```rust
    /// use pourover::core::{ChangeCause, StepChange, StepHistory};
    /// use chrono::Utc;
    ///
    /// let history = StepHistory::new();
    /// let updated = history.record(StepChange {
    ///     from: 0,
    ///     to: 1,
    ///     cause: ChangeCause::Next,
    ///     elapsed: 3,
    ///     timestamp: Utc::now(),
    /// });
    ///
    /// assert_eq!(updated.changes().len(), 1);
    /// assert!(history.is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, change: StepChange) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Step indices visited in order: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.first() {
            path.push(first.from);
        }
        path.extend(self.changes.iter().map(|c| c.to));
        path
    }

    /// Wall-clock span between the first and last recorded change.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.first()?, self.changes.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of changes with the given cause.
    pub fn count(&self, cause: ChangeCause) -> usize {
        self.changes.iter().filter(|c| c.cause == cause).count()
    }

    /// All recorded changes, oldest first.
    pub fn changes(&self) -> &[StepChange] {
        &self.changes
    }

    /// Whether no change has been recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: usize, to: usize, cause: ChangeCause, elapsed: u32) -> StepChange {
        StepChange {
            from,
            to,
            cause,
            elapsed,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StepHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StepHistory::new();
        let new_history = history.record(change(0, 1, ChangeCause::Next, 0));

        assert_eq!(history.changes().len(), 0);
        assert_eq!(new_history.changes().len(), 1);
    }

    #[test]
    fn path_returns_visited_steps() {
        let history = StepHistory::new()
            .record(change(0, 1, ChangeCause::AutoAdvance, 30))
            .record(change(1, 2, ChangeCause::AutoAdvance, 60))
            .record(change(2, 1, ChangeCause::Previous, 61));

        assert_eq!(history.path(), vec![0, 1, 2, 1]);
    }

    #[test]
    fn count_filters_by_cause() {
        let history = StepHistory::new()
            .record(change(0, 1, ChangeCause::AutoAdvance, 30))
            .record(change(1, 2, ChangeCause::Next, 31))
            .record(change(2, 1, ChangeCause::Previous, 32))
            .record(change(1, 2, ChangeCause::AutoAdvance, 60));

        assert_eq!(history.count(ChangeCause::AutoAdvance), 2);
        assert_eq!(history.count(ChangeCause::Next), 1);
        assert_eq!(history.count(ChangeCause::Previous), 1);
    }

    #[test]
    fn single_change_has_duration_zero() {
        let history = StepHistory::new().record(change(0, 1, ChangeCause::Next, 0));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StepHistory::new()
            .record(StepChange {
                timestamp: start,
                ..change(0, 1, ChangeCause::AutoAdvance, 30)
            })
            .record(StepChange {
                timestamp: start + chrono::Duration::seconds(45),
                ..change(1, 2, ChangeCause::AutoAdvance, 75)
            });

        assert_eq!(history.duration(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StepHistory::new().record(change(0, 1, ChangeCause::AutoAdvance, 30));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StepHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
        assert!(json.contains("auto_advance"));
    }
}
