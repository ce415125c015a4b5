//! Pourover: a guided brew timer as a pure state machine
//!
//! Pourover walks a brewer through the ordered, timed steps of a coffee
//! recipe. The core is a synchronous, single-owner state machine with no
//! timer of its own; whoever owns a [`BrewSession`] calls `tick()` once per
//! second and renders the derived values it exposes.
//!
//! # Core Concepts
//!
//! - **Recipe**: Read-only input, an ordered list of timed steps
//! - **Scale**: Validated batch multiplier (0.5x to 3.0x in 0.5 steps)
//! - **Session**: Countdown, step transitions, pause/resume and seeking
//! - **Summary**: What the owner hands on once the brew ends
//! - **Driver**: Optional tokio interval task (feature `driver`)
//!
//! # Example
//!
//! ```rust
//! use pourover::{BrewSession, RecipeBuilder, StepBuilder};
//!
//! let recipe = RecipeBuilder::new()
//!     .name("V60")
//!     .coffee(15.0)
//!     .water(250.0)
//!     .step(StepBuilder::bloom(30, 50.0))
//!     .step(StepBuilder::finish())
//!     .build()
//!     .unwrap();
//!
//! let mut session = BrewSession::start(recipe, 1.0).unwrap();
//! for _ in 0..30 {
//!     session.tick();
//! }
//! assert_eq!(session.step_time_remaining(), 0);
//!
//! session.tick();
//! assert!(session.is_complete());
//!
//! let summary = session.finish();
//! assert_eq!(summary.total_elapsed_secs, 30);
//! ```

pub mod config;
pub mod core;
#[cfg(feature = "driver")]
pub mod driver;
pub mod recipe;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use config::{AdvancePolicy, SessionConfig};
pub use crate::core::{BrewPhase, ChangeCause, StepChange, StepHistory};
pub use recipe::{BrewRecipe, BrewStep, RecipeBuilder, Scale, StepBuilder, StepType};
pub use session::{BrewSession, SessionError, TickOutcome};
pub use summary::{BrewOutcome, BrewSummary};
