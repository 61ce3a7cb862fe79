//! Dry-run submission agent.
//!
//! Replays the interaction plan against the grid model instead of a live
//! page: timestamps present in the model are "marked", others report
//! `TargetNotFound`, exactly as a browser driver would for a missing cell.

use availgrid_core::{AgentError, DayGroup, MarkFailure, Participant, SubmissionAgent};
use log::debug;
use std::collections::HashSet;

/// Agent that records the plan without touching a page.
#[derive(Debug, Clone, Default)]
pub struct DryRunAgent {
    known: HashSet<i64>,
    transcript: Vec<String>,
}

impl DryRunAgent {
    pub fn new(days: &[DayGroup]) -> Self {
        Self {
            known: days.iter().flat_map(DayGroup::timestamps).collect(),
            transcript: Vec::new(),
        }
    }

    /// Interactions in the order they were attempted.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }
}

impl SubmissionAgent for DryRunAgent {
    fn authenticate(&mut self, participant: &Participant) -> Result<(), AgentError> {
        self.transcript.push(format!(
            "sign in as {}{}",
            participant.name,
            if participant.password.is_some() {
                " (with password)"
            } else {
                ""
            }
        ));
        Ok(())
    }

    fn mark(&mut self, timestamp: i64) -> Result<(), MarkFailure> {
        if !self.known.contains(&timestamp) {
            self.transcript.push(format!("skip {timestamp} (no cell)"));
            return Err(MarkFailure::TargetNotFound { timestamp });
        }
        self.transcript.push(format!("mark {timestamp}"));
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), AgentError> {
        self.transcript.push("finalize".to_string());
        debug!(
            "event=dry_run_finalize module=tools status=ok steps={}",
            self.transcript.len()
        );
        Ok(())
    }
}
