//! Core session vocabulary.
//!
//! This module contains the small, pure building blocks the brew session is
//! made of:
//! - The derived lifecycle phase
//! - Immutable step change history
//!
//! Nothing in here performs I/O or reads a clock other than for history
//! timestamps supplied by the caller.

mod history;
mod state;

pub use history::{ChangeCause, StepChange, StepHistory};
pub use state::BrewPhase;
