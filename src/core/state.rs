//! Lifecycle phase of a brew session.
//!
//! The phase is never stored on the session. It is derived from the
//! running/paused flags and the countdown position, so it can never drift
//! out of sync with the fields it summarises.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable phase of a [`BrewSession`](crate::session::BrewSession).
///
/// `Complete` is reached, not set: it holds whenever the session sits on its
/// last step with nothing left on the countdown.
///
/// # Example
///
/// ```rust
/// use pourover::core::BrewPhase;
///
/// assert_eq!(BrewPhase::Running.name(), "Running");
/// assert!(BrewPhase::Complete.is_final());
/// assert!(!BrewPhase::Paused.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum BrewPhase {
    /// Prepared but never resumed.
    NotStarted,
    /// Ticking.
    Running,
    /// Was running and has been explicitly paused.
    Paused,
    /// Last step reached with an empty countdown.
    Complete,
}

impl BrewPhase {
    /// Derive the phase from raw session flags.
    ///
    /// Completion wins over the running/paused flags because a finished brew
    /// stays finished whatever the caller does to its timer.
    pub fn from_flags(is_running: bool, is_paused: bool, is_complete: bool) -> Self {
        if is_complete {
            Self::Complete
        } else if is_running {
            Self::Running
        } else if is_paused {
            Self::Paused
        } else {
            Self::NotStarted
        }
    }

    /// Display name for logs and UI labels.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Complete => "Complete",
        }
    }

    /// Terminal phase: no further countdown happens.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether an interval driver should be invoking `tick()`.
    pub fn accepts_ticks(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for BrewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
