//! Structured result envelopes for the tool surface.
//!
//! Every tool call returns `ToolResponse<T>`: `ok` plus either `data` or a
//! `ToolError { kind, message }`. Core errors are mapped here so transports
//! never see Rust error types. A submission that fails after marking also
//! carries its per-timestamp report in `partial_report`.

use availgrid_core::{
    CellValidationError, GridError, LoggingError, SourceError, SubmissionError, SubmissionReport,
    ZoneParseError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable error category for tool callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// Caller input is malformed or incomplete.
    InvalidInput,
    /// Cells violate grid invariants.
    InvalidGrid,
    /// Grid source could not produce cells.
    SourceUnavailable,
    /// Submission agent rejected the participant.
    AuthenticationFailed,
    /// Submission agent failed after marking.
    SubmissionFailed,
}

impl ToolErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::InvalidGrid => "invalid_grid",
            Self::SourceUnavailable => "source_unavailable",
            Self::AuthenticationFailed => "authentication_failed",
            Self::SubmissionFailed => "submission_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_report: Option<SubmissionReport>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            partial_report: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidInput, message)
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for ToolError {}

impl From<SourceError> for ToolError {
    fn from(value: SourceError) -> Self {
        let kind = match &value {
            SourceError::InvalidUrl { .. } | SourceError::MalformedDump(_) => {
                ToolErrorKind::InvalidInput
            }
            SourceError::Io { .. } | SourceError::Unavailable(_) => {
                ToolErrorKind::SourceUnavailable
            }
        };
        Self::new(kind, value.to_string())
    }
}

impl From<CellValidationError> for ToolError {
    fn from(value: CellValidationError) -> Self {
        Self::new(ToolErrorKind::InvalidGrid, value.to_string())
    }
}

impl From<GridError> for ToolError {
    fn from(value: GridError) -> Self {
        match value {
            GridError::Source(err) => err.into(),
            GridError::InvalidCells(err) => err.into(),
        }
    }
}

impl From<SubmissionError> for ToolError {
    fn from(value: SubmissionError) -> Self {
        let kind = match &value {
            SubmissionError::NothingToSubmit => ToolErrorKind::InvalidInput,
            SubmissionError::Authentication(_) => ToolErrorKind::AuthenticationFailed,
            SubmissionError::Finalize { .. } => ToolErrorKind::SubmissionFailed,
        };
        let message = value.to_string();
        let partial_report = match value {
            SubmissionError::Finalize { report, .. } => Some(*report),
            SubmissionError::NothingToSubmit | SubmissionError::Authentication(_) => None,
        };
        Self {
            kind,
            message,
            partial_report,
        }
    }
}

impl From<ZoneParseError> for ToolError {
    fn from(value: ZoneParseError) -> Self {
        Self::invalid_input(value.to_string())
    }
}

impl From<LoggingError> for ToolError {
    fn from(value: LoggingError) -> Self {
        Self::invalid_input(value.to_string())
    }
}

/// Result envelope returned by every tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl<T> ToolResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ToolError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, ToolError> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, Some(error)) => Err(error),
            (None, None) => Err(ToolError::invalid_input("empty tool response")),
        }
    }
}

impl<T> From<Result<T, ToolError>> for ToolResponse<T> {
    fn from(value: Result<T, ToolError>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}
