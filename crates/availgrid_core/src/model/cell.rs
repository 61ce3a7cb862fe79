//! Raw grid cell model and ingestion validation.
//!
//! # Responsibility
//! - Define `RawCell`, the unit every grid source produces.
//! - Reject malformed cell sets before they reach the normalizer.
//!
//! # Invariants
//! - `timestamp` is a multiple of `SLOT_SECONDS`.
//! - A timestamp appears at most once in a cell set, so its `day` is stable.

use crate::model::SLOT_SECONDS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One raw 15-minute cell as extracted from the scheduling page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    /// UTC epoch seconds.
    pub timestamp: i64,
    /// Zero-based column index inside the scheduling window.
    pub day: u32,
    /// Vertical position inside the column. Only used to break ties.
    #[serde(default)]
    pub row: u32,
    /// Site-provided time text, passed through untouched.
    #[serde(default)]
    pub label: String,
}

impl RawCell {
    pub fn new(timestamp: i64, day: u32, row: u32, label: impl Into<String>) -> Self {
        Self {
            timestamp,
            day,
            row,
            label: label.into(),
        }
    }
}

/// Ingestion error for inconsistent cell sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValidationError {
    /// Timestamp is not aligned to the 15-minute grid.
    MisalignedTimestamp { timestamp: i64 },
    /// Same timestamp reported twice.
    DuplicateTimestamp {
        timestamp: i64,
        first_day: u32,
        second_day: u32,
    },
}

impl Display for CellValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MisalignedTimestamp { timestamp } => write!(
                f,
                "timestamp {timestamp} is not a multiple of {SLOT_SECONDS} seconds"
            ),
            Self::DuplicateTimestamp {
                timestamp,
                first_day,
                second_day,
            } if first_day == second_day => write!(
                f,
                "timestamp {timestamp} appears more than once in day {first_day}"
            ),
            Self::DuplicateTimestamp {
                timestamp,
                first_day,
                second_day,
            } => write!(
                f,
                "timestamp {timestamp} is claimed by day {first_day} and day {second_day}"
            ),
        }
    }
}

impl Error for CellValidationError {}

/// Validates grid-level invariants of a raw cell set.
///
/// Returns the first violation in input order. An empty set is valid.
pub fn validate_cells(cells: &[RawCell]) -> Result<(), CellValidationError> {
    let mut seen = HashMap::<i64, u32>::with_capacity(cells.len());
    for cell in cells {
        if cell.timestamp.rem_euclid(SLOT_SECONDS) != 0 {
            return Err(CellValidationError::MisalignedTimestamp {
                timestamp: cell.timestamp,
            });
        }
        if let Some(first_day) = seen.insert(cell.timestamp, cell.day) {
            return Err(CellValidationError::DuplicateTimestamp {
                timestamp: cell.timestamp,
                first_day,
                second_day: cell.day,
            });
        }
    }
    Ok(())
}
