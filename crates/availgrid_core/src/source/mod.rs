//! Grid source SPI.
//!
//! # Responsibility
//! - Define the contract page extractors implement to hand raw cells to core.
//! - Provide in-memory and cell-dump file sources.
//! - Validate scheduling page URLs before any collaborator touches them.
//!
//! # Invariants
//! - Sources report failures as `SourceError`; they never return partial
//!   cell sets on error.

use crate::model::cell::RawCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod event_url;
mod file;

pub use event_url::EventUrl;
pub use file::{parse_cell_dump, JsonFileGridSource};

/// Source-layer error.
#[derive(Debug)]
pub enum SourceError {
    /// Scheduling page URL is malformed or unsupported.
    InvalidUrl { url: String, message: String },
    /// Cell dump cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Cell dump is not a valid JSON cell array.
    MalformedDump(serde_json::Error),
    /// Collaborator could not produce cells (network, page layout, ...).
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { url, message } => write!(f, "invalid event url `{url}`: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to read cell dump `{}`: {source}", path.display())
            }
            Self::MalformedDump(err) => write!(f, "malformed cell dump: {err}"),
            Self::Unavailable(message) => write!(f, "grid source unavailable: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MalformedDump(err) => Some(err),
            Self::InvalidUrl { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedDump(value)
    }
}

/// Producer of raw grid cells.
pub trait GridSource {
    /// Short identifier used in diagnostics.
    fn source_id(&self) -> &str;

    /// Returns every cell of the grid.
    fn fetch_cells(&self) -> Result<Vec<RawCell>, SourceError>;
}

/// Source over cells already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticGridSource {
    cells: Vec<RawCell>,
}

impl StaticGridSource {
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }
}

impl GridSource for StaticGridSource {
    fn source_id(&self) -> &str {
        "static"
    }

    fn fetch_cells(&self) -> Result<Vec<RawCell>, SourceError> {
        Ok(self.cells.clone())
    }
}
