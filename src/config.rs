//! Session configuration.
//!
//! # Example
//!
//! ```rust
//! use pourover::config::{AdvancePolicy, SessionConfig};
//!
//! let config = SessionConfig::from_toml_str(r#"
//!     advance_policy = "immediate"
//!     record_history = false
//! "#).unwrap();
//!
//! assert_eq!(config.advance_policy, AdvancePolicy::Immediate);
//! assert!(!config.record_history);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid session configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How a countdown that has reached zero hands over to the next step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// Show the finished step at 0 for one tick, advance on the next.
    #[default]
    ExtraTick,

    /// Advance within the tick that reaches zero, skipping intermediate
    /// zero-duration steps.
    Immediate,
}

/// Behavioural knobs for a [`BrewSession`](crate::session::BrewSession).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub advance_policy: AdvancePolicy,
    /// Keep a [`StepHistory`](crate::core::StepHistory) of step changes
    pub record_history: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_policy: AdvancePolicy::ExtraTick,
            record_history: true,
        }
    }
}

impl SessionConfig {
    /// Start a [`SessionConfigBuilder`].
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }

    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// Builder seeded with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// What to do when a countdown reaches zero.
    pub fn advance_policy(mut self, policy: AdvancePolicy) -> Self {
        self.config.advance_policy = policy;
        self
    }

    /// Keep a [`StepHistory`](crate::core::StepHistory) of step changes.
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.config.record_history = enabled;
        self
    }

    /// Finish building.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}
