//! Cell dump decoding and file-backed grid source.

use crate::model::cell::RawCell;
use crate::source::{GridSource, SourceError};
use log::info;
use std::path::{Path, PathBuf};

/// Decodes a JSON array of cells.
///
/// `row` and `label` may be omitted; they default to `0` and `""`.
pub fn parse_cell_dump(json: &str) -> Result<Vec<RawCell>, SourceError> {
    Ok(serde_json::from_str::<Vec<RawCell>>(json)?)
}

/// Grid source backed by a cell dump written by a page extractor.
#[derive(Debug, Clone)]
pub struct JsonFileGridSource {
    path: PathBuf,
    id: String,
}

impl JsonFileGridSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let id = format!("file:{}", path.display());
        Self { path, id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridSource for JsonFileGridSource {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn fetch_cells(&self) -> Result<Vec<RawCell>, SourceError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let cells = parse_cell_dump(&raw)?;
        info!(
            "event=source_fetch module=source status=ok source=file cells={}",
            cells.len()
        );
        Ok(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_cell_dump;
    use crate::model::cell::RawCell;
    use crate::source::SourceError;

    #[test]
    fn decodes_cell_array() {
        let cells = parse_cell_dump(
            r#"[{"timestamp": 900, "day": 0, "row": 4, "label": "9:00 AM"},
                {"timestamp": 1800, "day": 1}]"#,
        )
        .unwrap();
        assert_eq!(
            cells,
            vec![
                RawCell::new(900, 0, 4, "9:00 AM"),
                RawCell::new(1800, 1, 0, ""),
            ]
        );
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let err = parse_cell_dump(r#"[{"day": 0}]"#).unwrap_err();
        assert!(matches!(err, SourceError::MalformedDump(_)));
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn negative_day_is_malformed() {
        let err = parse_cell_dump(r#"[{"timestamp": 900, "day": -1}]"#).unwrap_err();
        assert!(matches!(err, SourceError::MalformedDump(_)));
    }
}
