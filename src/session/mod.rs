//! The guided brew timer.
//!
//! A [`BrewSession`] is a pure, synchronous state machine. It owns no timer:
//! the caller invokes [`BrewSession::tick`] once per second while the session
//! is running, and reacts to the returned [`TickOutcome`].
//!
//! # Example
//!
//! ```rust
//! use pourover::recipe::{RecipeBuilder, StepBuilder};
//! use pourover::session::{BrewSession, TickOutcome};
//!
//! let recipe = RecipeBuilder::new()
//!     .name("Tiny")
//!     .coffee(10.0)
//!     .water(160.0)
//!     .step(StepBuilder::bloom(1, 30.0))
//!     .step(StepBuilder::wait(1))
//!     .build()
//!     .unwrap();
//!
//! let mut session = BrewSession::start(recipe, 1.0).unwrap();
//! let mut outcomes = Vec::new();
//! while !session.is_complete() {
//!     outcomes.push(session.tick());
//! }
//!
//! assert_eq!(outcomes, vec![
//!     TickOutcome::Counted { remaining: 0 },
//!     TickOutcome::Advanced { from: 0, to: 1, completed: false },
//!     TickOutcome::Completed,
//! ]);
//! ```

mod error;
mod machine;
mod outcome;
mod view;

pub use error::SessionError;
pub use machine::BrewSession;
pub use outcome::TickOutcome;
pub use view::{format_clock, ScaledStep, SessionSnapshot};
