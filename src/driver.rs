//! Interval driver for a brew session (feature `driver`).
//!
//! The session never owns a timer. This module supplies the one-second
//! driver a UI would otherwise build itself: a single task owns the session,
//! ticks it on a tokio interval while it is running, and applies user
//! commands between ticks. Ticks and commands are serialised through one
//! `select!` loop, so the session still has exactly one writer.
//!
//! # Example
//!
//! ```rust,no_run
//! use pourover::driver::{DriverCommand, SessionDriver};
//! use pourover::recipe::{RecipeBuilder, StepBuilder};
//! use pourover::session::BrewSession;
//! use std::time::Duration;
//!
//! # async fn brew() {
//! let recipe = RecipeBuilder::new()
//!     .name("V60")
//!     .coffee(15.0)
//!     .water(250.0)
//!     .step(StepBuilder::bloom(45, 50.0))
//!     .step(StepBuilder::finish())
//!     .build()
//!     .unwrap();
//!
//! let session = BrewSession::start(recipe, 1.0).unwrap();
//! let (driver, handle) = SessionDriver::new(session, Duration::from_secs(1));
//!
//! // Hand `handle` to the UI; it sends Pause/Resume/Next/Previous/Cancel.
//! handle.send(DriverCommand::Pause).unwrap();
//!
//! let summary = driver.run(&mut ()).await;
//! println!("brewed for {}s", summary.total_elapsed_secs);
//! # }
//! ```

use crate::session::{BrewSession, TickOutcome};
use crate::summary::BrewSummary;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// User action forwarded to the driven session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverCommand {
    Pause,
    Resume,
    Next,
    Previous,
    Cancel,
}

#[derive(Debug, Error, PartialEq)]
pub enum DriverError {
    #[error("Driver has stopped; command {0:?} was not delivered")]
    Closed(DriverCommand),
}

/// Callbacks invoked by the driver. Every method has a no-op default.
pub trait SessionObserver {
    fn on_tick(&mut self, _session: &BrewSession, _outcome: TickOutcome) {}

    /// Fired for automatic advances and for Next/Previous commands alike.
    fn on_step_change(&mut self, _session: &BrewSession, _from: usize, _to: usize) {}

    fn on_complete(&mut self, _summary: &BrewSummary) {}

    fn on_cancel(&mut self, _summary: &BrewSummary) {}
}

impl SessionObserver for () {}

/// Cloneable sender for [`DriverCommand`]s.
#[derive(Clone, Debug)]
pub struct DriverHandle {
    tx: mpsc::UnboundedSender<DriverCommand>,
}

impl DriverHandle {
    /// Queue a command for the driver.
    pub fn send(&self, command: DriverCommand) -> Result<(), DriverError> {
        self.tx
            .send(command)
            .map_err(|_| DriverError::Closed(command))
    }

    /// Whether the driver has stopped listening.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns a session and ticks it once per `period`.
pub struct SessionDriver {
    session: BrewSession,
    period: Duration,
    commands: mpsc::UnboundedReceiver<DriverCommand>,
}

impl SessionDriver {
    /// Wrap `session` and return the handle that controls it.
    pub fn new(session: BrewSession, period: Duration) -> (Self, DriverHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let driver = Self {
            session,
            period,
            commands,
        };
        (driver, DriverHandle { tx })
    }

    /// Session being driven.
    pub fn session(&self) -> &BrewSession {
        &self.session
    }

    /// Drive the session until it completes or is cancelled.
    ///
    /// Dropping every [`DriverHandle`] counts as a cancel.
    pub async fn run<O: SessionObserver>(mut self, observer: &mut O) -> BrewSummary {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if self.session.is_complete() {
                let summary = self.session.finish();
                observer.on_complete(&summary);
                return summary;
            }

            tokio::select! {
                _ = ticker.tick(), if self.session.phase().accepts_ticks() => {
                    let outcome = self.session.tick();
                    observer.on_tick(&self.session, outcome);
                    if let TickOutcome::Advanced { from, to, .. } = outcome {
                        observer.on_step_change(&self.session, from, to);
                    }
                }
                command = self.commands.recv() => match command {
                    Some(DriverCommand::Cancel) | None => {
                        let summary = self.session.cancel();
                        observer.on_cancel(&summary);
                        return summary;
                    }
                    Some(command) => {
                        debug!(session = %self.session.id(), ?command, "driver command");
                        self.apply(command, &mut ticker, &mut *observer);
                    }
                },
            }
        }
    }

    fn apply<O: SessionObserver>(
        &mut self,
        command: DriverCommand,
        ticker: &mut tokio::time::Interval,
        observer: &mut O,
    ) {
        let from = self.session.current_step_index();
        let moved = match command {
            DriverCommand::Pause => {
                self.session.pause();
                false
            }
            DriverCommand::Resume => {
                if !self.session.is_running() {
                    // A full period must pass before the first tick after resuming.
                    ticker.reset();
                }
                self.session.resume();
                false
            }
            DriverCommand::Next => self.session.next_step(),
            DriverCommand::Previous => self.session.prev_step(),
            DriverCommand::Cancel => false,
        };

        if moved {
            observer.on_step_change(&self.session, from, self.session.current_step_index());
        }
    }
}
