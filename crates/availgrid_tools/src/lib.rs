//! Textual tool surface over `availgrid_core`.
//!
//! # Responsibility
//! - Expose the grid, prompt, selection and formatting use-cases as calls
//!   with serializable inputs and `ToolResponse` outputs.
//! - Keep transport layers (CLI, RPC) free of core error types.
//!
//! # Invariants
//! - Exported calls never panic.
//! - Errors always carry a stable `ToolErrorKind`.

pub mod api;
pub mod config;
pub mod dry_run;
pub mod envelope;

pub use api::{
    compile_prompt, core_version, describe_grid, dry_run_submit, format_selection, init_logging,
    parse_selection, SourceSpec, SubmitOutcome, SubmitRequest,
};
pub use config::{tool_config, ToolConfig};
pub use dry_run::DryRunAgent;
pub use envelope::{ToolError, ToolErrorKind, ToolResponse};
