//! What a single `tick()` did.

use serde::{Deserialize, Serialize};

/// Result of one call to [`BrewSession::tick`](crate::session::BrewSession::tick).
///
/// Lets the caller react to step changes (sound cue) and completion without
/// diffing session fields before and after the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Session was not running; nothing changed.
    Ignored,

    /// One second was counted off the current step.
    Counted { remaining: u32 },

    /// The session moved on to another step.
    Advanced {
        from: usize,
        to: usize,
        /// The step entered is the last one and has nothing left to count
        completed: bool,
    },

    /// The last step's countdown reached zero on this tick.
    Completed,

    /// Already complete; nothing changed.
    Finished,
}

impl TickOutcome {
    /// New step index, if the tick changed step.
    pub fn step_changed(&self) -> Option<usize> {
        match self {
            Self::Advanced { to, .. } => Some(*to),
            _ => None,
        }
    }

    /// Whether this tick is the one that completed the brew.
    ///
    /// True once per session; `Finished` ticks afterwards return false.
    pub fn just_completed(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Advanced {
                completed: true,
                ..
            }
        )
    }

    /// Whether any session field changed.
    pub fn changed_state(&self) -> bool {
        !matches!(self, Self::Ignored | Self::Finished)
    }
}
