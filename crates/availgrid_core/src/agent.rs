//! Submission agent SPI.
//!
//! # Responsibility
//! - Define the contract for collaborators that persist availability on the
//!   scheduling page (browser drivers, API clients, dry runs).
//!
//! # Invariants
//! - One agent instance drives one page and is used sequentially.
//! - Per-timestamp failures are typed and attributable to that timestamp.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity used to sign in on the scheduling page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub password: Option<String>,
}

impl Participant {
    /// Builds a participant with a trimmed, non-empty name.
    ///
    /// A blank password is treated as no password.
    pub fn new(name: &str, password: Option<&str>) -> Result<Self, AgentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AgentError::new("participant name cannot be empty"));
        }
        Ok(Self {
            name: name.to_string(),
            password: password
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        })
    }
}

/// Agent-level failure outside a single mark operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentError {
    pub message: String,
}

impl AgentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for AgentError {}

/// Failure to mark one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkFailure {
    /// No grid cell for the timestamp exists on the page.
    TargetNotFound { timestamp: i64 },
    /// The cell exists but the interaction did not take effect.
    Interaction { timestamp: i64, message: String },
}

impl Display for MarkFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotFound { timestamp } => {
                write!(f, "no grid cell found for timestamp {timestamp}")
            }
            Self::Interaction { timestamp, message } => {
                write!(f, "failed to mark timestamp {timestamp}: {message}")
            }
        }
    }
}

impl Error for MarkFailure {}

/// Collaborator that applies availability on the scheduling page.
pub trait SubmissionAgent {
    /// Signs in once before any mark.
    fn authenticate(&mut self, participant: &Participant) -> Result<(), AgentError>;

    /// Marks one timestamp as available.
    fn mark(&mut self, timestamp: i64) -> Result<(), MarkFailure>;

    /// Called after the final settle delay; commits or closes the session.
    fn finalize(&mut self) -> Result<(), AgentError>;
}
