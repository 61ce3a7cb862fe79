//! Tool-level use-case API.
//!
//! # Responsibility
//! - Expose `describe_grid`, `compile_prompt`, `parse_selection`,
//!   `format_selection` and `dry_run_submit` as stable tool calls.
//! - Resolve display zone and pacing defaults from `ToolConfig`.
//!
//! # Invariants
//! - Tool calls never panic; every failure is a `ToolError { kind, message }`.
//! - Validation failures return no partial data.
//! - Lookup misses inside a selection are not failures.

use crate::config::{tool_config, ToolConfig};
use crate::dry_run::DryRunAgent;
use crate::envelope::{ToolError, ToolResponse};
use availgrid_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, CompiledPrompt,
    DayGroup, EventUrl, GridService, JsonFileGridSource, Participant, RawCell, SelectionResult,
    SlotLookup, StaticGridSource, SubmissionPacing, SubmissionReport, SubmissionService,
};
use log::info;
use serde::{Deserialize, Serialize};

/// Where `describe_grid` reads cells from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSpec {
    /// JSON cell dump on disk.
    File { path: String },
    /// Cells supplied by the caller.
    Inline { cells: Vec<RawCell> },
}

/// Dry-run submission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub event_url: String,
    pub name: String,
    #[serde(default)]
    pub password: Option<String>,
    pub timestamps: Vec<i64>,
    /// Apply the configured settle delays, as a live agent would.
    #[serde(default)]
    pub paced: bool,
}

/// Dry-run outcome: the per-timestamp report plus the replayed plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub report: SubmissionReport,
    pub transcript: Vec<String>,
}

/// Returns the core crate version.
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts file logging from explicit values or `ToolConfig` defaults.
///
/// Returns `Ok(false)` when no log directory is configured.
pub fn init_logging(level: Option<&str>, log_dir: Option<&str>) -> Result<bool, ToolError> {
    let config = tool_config();
    let level = level.unwrap_or(config.log_level.as_str());
    let Some(log_dir) = log_dir.or(config.log_dir.as_deref()) else {
        return Ok(false);
    };
    init_logging_inner(level, log_dir)?;
    Ok(true)
}

/// Fetches, validates and normalizes a grid.
///
/// # Tool contract
/// - `invalid_input` for an empty path, malformed dump or unknown zone.
/// - `source_unavailable` when the dump cannot be read.
/// - `invalid_grid` when cells break grid invariants.
pub fn describe_grid(source: &SourceSpec, time_zone: Option<&str>) -> ToolResponse<Vec<DayGroup>> {
    describe_grid_with(tool_config(), source, time_zone).into()
}

fn describe_grid_with(
    config: &ToolConfig,
    source: &SourceSpec,
    time_zone: Option<&str>,
) -> Result<Vec<DayGroup>, ToolError> {
    let zone = config.resolve_zone(time_zone)?;
    let days = match source {
        SourceSpec::File { path } => {
            let path = path.trim();
            if path.is_empty() {
                return Err(ToolError::invalid_input("source path cannot be empty"));
            }
            GridService::new(JsonFileGridSource::new(path), zone).describe()?
        }
        SourceSpec::Inline { cells } => {
            GridService::new(StaticGridSource::new(cells.clone()), zone).describe()?
        }
    };
    Ok(days)
}

/// Renders the selection menu and slot lookup.
pub fn compile_prompt(days: &[DayGroup], time_zone: Option<&str>) -> ToolResponse<CompiledPrompt> {
    tool_config()
        .resolve_zone(time_zone)
        .map(|zone| availgrid_core::compile_prompt(days, zone))
        .map_err(ToolError::from)
        .into()
}

/// Parses a free-form answer into a selection.
///
/// Unknown codes are ignored; an answer matching nothing is an empty
/// selection, not an error.
pub fn parse_selection(
    text: &str,
    days: &[DayGroup],
    lookup: &SlotLookup,
    time_zone: Option<&str>,
) -> ToolResponse<SelectionResult> {
    tool_config()
        .resolve_zone(time_zone)
        .map(|zone| availgrid_core::parse_selection(text, days, lookup, zone))
        .map_err(ToolError::from)
        .into()
}

/// Renders confirmation lines for a selection.
pub fn format_selection(
    selection: &SelectionResult,
    days: &[DayGroup],
    time_zone: Option<&str>,
) -> ToolResponse<Vec<String>> {
    tool_config()
        .resolve_zone(time_zone)
        .map(|zone| availgrid_core::format_selection(&selection.timestamps, days, zone))
        .map_err(ToolError::from)
        .into()
}

/// Replays a submission against the grid model without a live page.
///
/// # Tool contract
/// - `invalid_input` for a malformed event URL, blank name or empty selection.
/// - Per-timestamp failures are reported inside `report.marks`.
pub fn dry_run_submit(request: &SubmitRequest, days: &[DayGroup]) -> ToolResponse<SubmitOutcome> {
    let pacing = if request.paced {
        tool_config().pacing
    } else {
        SubmissionPacing::immediate()
    };
    dry_run_submit_with(request, days, pacing).into()
}

fn dry_run_submit_with(
    request: &SubmitRequest,
    days: &[DayGroup],
    pacing: SubmissionPacing,
) -> Result<SubmitOutcome, ToolError> {
    let event = EventUrl::parse(&request.event_url)?;
    let participant = Participant::new(&request.name, request.password.as_deref())
        .map_err(|err| ToolError::invalid_input(err.to_string()))?;

    let mut service = SubmissionService::new(DryRunAgent::new(days), event, pacing);
    let report = service.submit(&participant, &request.timestamps)?;
    let transcript = service.into_agent().transcript().to_vec();

    info!(
        "event=dry_run_submit module=tools status=ok marked={} failed={}",
        report.marked_count(),
        report.failed_count()
    );
    Ok(SubmitOutcome { report, transcript })
}
