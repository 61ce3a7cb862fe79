//! Scheduling page URL validation.

use crate::source::SourceError;
use std::fmt::{Display, Formatter};
use url::Url;

/// Validated `http(s)` URL of a scheduling page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventUrl(Url);

impl EventUrl {
    /// Parses and checks scheme and host.
    ///
    /// # Errors
    /// - Returns `SourceError::InvalidUrl` for empty, unparsable, non-http(s)
    ///   or host-less input.
    pub fn parse(raw: &str) -> Result<Self, SourceError> {
        let trimmed = raw.trim();
        let invalid = |message: String| SourceError::InvalidUrl {
            url: trimmed.to_string(),
            message,
        };

        if trimmed.is_empty() {
            return Err(invalid("url cannot be empty".to_string()));
        }
        let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme `{}`; expected http or https",
                url.scheme()
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("url has no host".to_string()));
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

impl Display for EventUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
