//! Core availability logic for availgrid.
//! This crate is the single source of truth for the grid model and the
//! selection mini-language. All core operations are pure functions over their
//! arguments; collaborators plug in through `GridSource` and `SubmissionAgent`.

pub mod agent;
pub mod grid;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod selection;
pub mod service;
pub mod source;

pub use agent::{AgentError, MarkFailure, Participant, SubmissionAgent};
pub use grid::normalize::{compress_blocks, normalize_cells};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::cell::{validate_cells, CellValidationError, RawCell};
pub use model::grid::{find_day, slot_id, DayGroup, SlotLookup, TimeBlock, TimeSlot};
pub use model::zone::{DisplayZone, ZoneParseError};
pub use model::SLOT_SECONDS;
pub use prompt::compiler::{compile_prompt, CompiledPrompt};
pub use selection::parser::{parse_selection, SelectionMode, SelectionResult};
pub use selection::readable::format_selection;
pub use selection::token::{is_raw_timestamp_list, tokenize, DayPeriod, SelectionToken};
pub use service::grid_service::{GridError, GridService};
pub use service::submission_service::{
    MarkOutcome, MarkReport, SubmissionError, SubmissionPacing, SubmissionReport,
    SubmissionService,
};
pub use source::{
    parse_cell_dump, EventUrl, GridSource, JsonFileGridSource, SourceError, StaticGridSource,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
