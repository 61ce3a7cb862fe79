//! Availability submission use-case.
//!
//! # Responsibility
//! - Drive one submission agent through authenticate, mark and finalize.
//! - Pace interactions so the target page can settle between clicks.
//! - Report every timestamp's outcome.
//!
//! # Invariants
//! - Authentication happens exactly once, before any mark.
//! - Marks run sequentially in the caller's timestamp order.
//! - A failed mark never stops later marks and is never dropped from the
//!   report, not even when finalizing fails.

use crate::agent::{AgentError, MarkFailure, Participant, SubmissionAgent};
use crate::source::EventUrl;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default delay between two marks.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(120);
/// Default delay before finalizing.
pub const DEFAULT_FINAL_SETTLE: Duration = Duration::from_secs(3);

/// Settle delays imposed by the target page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPacing {
    pub settle: Duration,
    pub final_settle: Duration,
}

impl Default for SubmissionPacing {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            final_settle: DEFAULT_FINAL_SETTLE,
        }
    }
}

impl SubmissionPacing {
    /// No delays. For dry runs and tests.
    pub fn immediate() -> Self {
        Self {
            settle: Duration::ZERO,
            final_settle: Duration::ZERO,
        }
    }
}

/// Submission-level error. Per-timestamp failures live in the report.
#[derive(Debug)]
pub enum SubmissionError {
    NothingToSubmit,
    Authentication(AgentError),
    /// Marks were attempted but could not be committed; `report` holds them.
    Finalize {
        error: AgentError,
        report: Box<SubmissionReport>,
    },
}

impl SubmissionError {
    /// Per-timestamp outcomes gathered before the failure, if any.
    pub fn partial_report(&self) -> Option<&SubmissionReport> {
        match self {
            Self::Finalize { report, .. } => Some(&**report),
            Self::NothingToSubmit | Self::Authentication(_) => None,
        }
    }
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToSubmit => write!(f, "selection is empty; nothing to submit"),
            Self::Authentication(err) => write!(f, "authentication failed: {err}"),
            Self::Finalize { error, report } => write!(
                f,
                "failed to finalize submission after {} of {} marks: {error}",
                report.marked_count(),
                report.marks.len()
            ),
        }
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NothingToSubmit => None,
            Self::Authentication(err) | Self::Finalize { error: err, .. } => Some(err),
        }
    }
}

/// Outcome for one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarkOutcome {
    Marked,
    Failed { failure: MarkFailure },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkReport {
    pub timestamp: i64,
    pub outcome: MarkOutcome,
}

/// Result of one submission run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub event_url: String,
    pub participant: String,
    pub marks: Vec<MarkReport>,
}

impl SubmissionReport {
    pub fn marked_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|mark| mark.outcome == MarkOutcome::Marked)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.marks.len() - self.marked_count()
    }

    pub fn all_marked(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Use-case service wrapping one agent bound to one scheduling page.
pub struct SubmissionService<A: SubmissionAgent> {
    agent: A,
    event: EventUrl,
    pacing: SubmissionPacing,
}

impl<A: SubmissionAgent> SubmissionService<A> {
    pub fn new(agent: A, event: EventUrl, pacing: SubmissionPacing) -> Self {
        Self {
            agent,
            event,
            pacing,
        }
    }

    /// Returns the wrapped agent, e.g. to inspect a dry-run transcript.
    pub fn into_agent(self) -> A {
        self.agent
    }

    /// Marks every timestamp for `participant`.
    ///
    /// # Errors
    /// - `NothingToSubmit` for an empty list (the agent is not touched).
    /// - `Authentication` when sign-in fails; no mark is attempted.
    /// - `Finalize` when the agent cannot commit after all marks; the error
    ///   still carries every mark outcome.
    pub fn submit(
        &mut self,
        participant: &Participant,
        timestamps: &[i64],
    ) -> Result<SubmissionReport, SubmissionError> {
        if timestamps.is_empty() {
            return Err(SubmissionError::NothingToSubmit);
        }

        self.agent.authenticate(participant).map_err(|err| {
            warn!(
                "event=submission_auth module=submission status=error host={}",
                self.event.host()
            );
            SubmissionError::Authentication(err)
        })?;

        let mut marks = Vec::with_capacity(timestamps.len());
        for (index, &timestamp) in timestamps.iter().enumerate() {
            if index > 0 {
                pause(self.pacing.settle);
            }
            let outcome = match self.agent.mark(timestamp) {
                Ok(()) => MarkOutcome::Marked,
                Err(failure) => {
                    warn!(
                        "event=submission_mark module=submission status=error timestamp={} error={}",
                        timestamp, failure
                    );
                    MarkOutcome::Failed { failure }
                }
            };
            marks.push(MarkReport { timestamp, outcome });
        }

        let report = SubmissionReport {
            event_url: self.event.to_string(),
            participant: participant.name.clone(),
            marks,
        };

        pause(self.pacing.final_settle);
        if let Err(error) = self.agent.finalize() {
            warn!(
                "event=submission_finalize module=submission status=error host={} marked={}",
                self.event.host(),
                report.marked_count()
            );
            return Err(SubmissionError::Finalize {
                error,
                report: Box::new(report),
            });
        }

        info!(
            "event=submission_done module=submission status=ok host={} marked={} failed={}",
            self.event.host(),
            report.marked_count(),
            report.failed_count()
        );
        Ok(report)
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkOutcome, SubmissionError, SubmissionPacing, SubmissionService};
    use crate::agent::{AgentError, MarkFailure, Participant, SubmissionAgent};
    use crate::source::EventUrl;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct ScriptedAgent {
        reject_auth: bool,
        reject_finalize: bool,
        missing: Vec<i64>,
        calls: Vec<String>,
    }

    impl SubmissionAgent for ScriptedAgent {
        fn authenticate(&mut self, participant: &Participant) -> Result<(), AgentError> {
            self.calls.push(format!("auth:{}", participant.name));
            if self.reject_auth {
                return Err(AgentError::new("wrong password"));
            }
            Ok(())
        }

        fn mark(&mut self, timestamp: i64) -> Result<(), MarkFailure> {
            self.calls.push(format!("mark:{timestamp}"));
            if self.missing.contains(&timestamp) {
                return Err(MarkFailure::TargetNotFound { timestamp });
            }
            Ok(())
        }

        fn finalize(&mut self) -> Result<(), AgentError> {
            self.calls.push("finalize".to_string());
            if self.reject_finalize {
                return Err(AgentError::new("save button disappeared"));
            }
            Ok(())
        }
    }

    fn event() -> EventUrl {
        EventUrl::parse("https://grid.example.com/?42").unwrap()
    }

    fn participant() -> Participant {
        Participant::new("ada", None).unwrap()
    }

    #[test]
    fn marks_in_order_and_reports_each_timestamp() {
        let agent = ScriptedAgent {
            missing: vec![1800],
            ..ScriptedAgent::default()
        };
        let mut service = SubmissionService::new(agent, event(), SubmissionPacing::immediate());

        let report = service.submit(&participant(), &[2700, 1800, 900]).unwrap();
        assert_eq!(report.marked_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_marked());
        assert_eq!(
            report.marks[1].outcome,
            MarkOutcome::Failed {
                failure: MarkFailure::TargetNotFound { timestamp: 1800 }
            }
        );

        let calls = service.into_agent().calls;
        assert_eq!(
            calls,
            vec!["auth:ada", "mark:2700", "mark:1800", "mark:900", "finalize"]
        );
    }

    #[test]
    fn failed_authentication_aborts_before_marks() {
        let agent = ScriptedAgent {
            reject_auth: true,
            ..ScriptedAgent::default()
        };
        let mut service = SubmissionService::new(agent, event(), SubmissionPacing::immediate());

        let err = service.submit(&participant(), &[900]).unwrap_err();
        assert!(matches!(err, SubmissionError::Authentication(_)));
        assert_eq!(service.into_agent().calls, vec!["auth:ada"]);
    }

    #[test]
    fn failed_finalize_still_reports_every_mark() {
        let agent = ScriptedAgent {
            reject_finalize: true,
            missing: vec![1800],
            ..ScriptedAgent::default()
        };
        let mut service = SubmissionService::new(agent, event(), SubmissionPacing::immediate());

        let err = service.submit(&participant(), &[900, 1800]).unwrap_err();
        let report = err.partial_report().expect("report survives finalize failure");
        assert_eq!(report.participant, "ada");
        assert_eq!(report.marks.len(), 2);
        assert_eq!(report.marks[0].outcome, MarkOutcome::Marked);
        assert_eq!(report.failed_count(), 1);
        assert!(err.to_string().contains("after 1 of 2 marks"));
        assert!(matches!(err, SubmissionError::Finalize { .. }));
        assert_eq!(
            service.into_agent().calls,
            vec!["auth:ada", "mark:900", "mark:1800", "finalize"]
        );
    }

    #[test]
    fn empty_selection_never_touches_the_agent() {
        let mut service = SubmissionService::new(
            ScriptedAgent::default(),
            event(),
            SubmissionPacing::immediate(),
        );
        assert!(matches!(
            service.submit(&participant(), &[]),
            Err(SubmissionError::NothingToSubmit)
        ));
        assert!(service.into_agent().calls.is_empty());
    }

    #[test]
    fn settle_delay_applies_between_marks_only() {
        let pacing = SubmissionPacing {
            settle: Duration::from_millis(20),
            final_settle: Duration::ZERO,
        };
        let mut service = SubmissionService::new(ScriptedAgent::default(), event(), pacing);

        let started = Instant::now();
        service.submit(&participant(), &[900, 1800, 2700]).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
