//! Grid description use-case.
//!
//! # Responsibility
//! - Fetch cells from a grid source, validate them and normalize them.
//!
//! # Invariants
//! - A cell set that fails validation never reaches the normalizer.
//! - Source and validation failures stay distinguishable for callers.

use crate::grid::normalize::normalize_cells;
use crate::model::cell::{validate_cells, CellValidationError};
use crate::model::grid::DayGroup;
use crate::model::zone::DisplayZone;
use crate::source::{GridSource, SourceError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for the describe use-case.
#[derive(Debug)]
pub enum GridError {
    Source(SourceError),
    InvalidCells(CellValidationError),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::InvalidCells(err) => write!(f, "invalid grid: {err}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::InvalidCells(err) => Some(err),
        }
    }
}

impl From<SourceError> for GridError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<CellValidationError> for GridError {
    fn from(value: CellValidationError) -> Self {
        Self::InvalidCells(value)
    }
}

/// Use-case service over one grid source.
pub struct GridService<S: GridSource> {
    source: S,
    zone: DisplayZone,
}

impl<S: GridSource> GridService<S> {
    pub fn new(source: S, zone: DisplayZone) -> Self {
        Self { source, zone }
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Fetches, validates and normalizes the grid.
    ///
    /// # Errors
    /// - `GridError::Source` when the collaborator fails.
    /// - `GridError::InvalidCells` when cells break grid invariants.
    pub fn describe(&self) -> Result<Vec<DayGroup>, GridError> {
        let cells = self.source.fetch_cells().map_err(|err| {
            warn!(
                "event=grid_describe module=grid status=error stage=fetch source={}",
                self.source.source_id()
            );
            err
        })?;

        if let Err(err) = validate_cells(&cells) {
            warn!(
                "event=grid_describe module=grid status=error stage=validate source={} cells={}",
                self.source.source_id(),
                cells.len()
            );
            return Err(err.into());
        }

        let days = normalize_cells(&cells, self.zone);
        info!(
            "event=grid_describe module=grid status=ok source={} days={} slots={}",
            self.source.source_id(),
            days.len(),
            cells.len()
        );
        Ok(days)
    }
}
