//! Environment-driven tool configuration.
//!
//! # Responsibility
//! - Resolve process-wide defaults (zone, logging, submission pacing) once.
//! - Let explicit call arguments override every default.
//!
//! # Invariants
//! - Unparsable numeric values fall back to defaults; they never abort startup.
//! - Zone names are validated at use, not at load, so a bad `AVAILGRID_TZ`
//!   surfaces as a structured `invalid_input` error.

use availgrid_core::{default_log_level, DisplayZone, SubmissionPacing, ZoneParseError};
use log::warn;
use std::sync::OnceLock;
use std::time::Duration;

pub const ENV_TIME_ZONE: &str = "AVAILGRID_TZ";
pub const ENV_LOG_LEVEL: &str = "AVAILGRID_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "AVAILGRID_LOG_DIR";
pub const ENV_SETTLE_MS: &str = "AVAILGRID_SETTLE_MS";
pub const ENV_FINAL_SETTLE_MS: &str = "AVAILGRID_FINAL_SETTLE_MS";

static TOOL_CONFIG: OnceLock<ToolConfig> = OnceLock::new();

/// Resolved tool defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Raw zone name; `None` means host local time.
    pub time_zone: Option<String>,
    pub log_level: String,
    /// Logging stays disabled without a directory.
    pub log_dir: Option<String>,
    pub pacing: SubmissionPacing,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            time_zone: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
            pacing: SubmissionPacing::default(),
        }
    }
}

impl ToolConfig {
    /// Reads configuration from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, one call per variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            time_zone: read(ENV_TIME_ZONE),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR),
            pacing: SubmissionPacing {
                settle: read_millis(read(ENV_SETTLE_MS), ENV_SETTLE_MS)
                    .unwrap_or(defaults.pacing.settle),
                final_settle: read_millis(read(ENV_FINAL_SETTLE_MS), ENV_FINAL_SETTLE_MS)
                    .unwrap_or(defaults.pacing.final_settle),
            },
        }
    }

    /// Zone for a call: explicit argument first, then configured default.
    pub fn resolve_zone(&self, explicit: Option<&str>) -> Result<DisplayZone, ZoneParseError> {
        match explicit.or(self.time_zone.as_deref()) {
            Some(name) => name.parse(),
            None => Ok(DisplayZone::Local),
        }
    }
}

/// Process-wide configuration, loaded from the environment on first use.
pub fn tool_config() -> &'static ToolConfig {
    TOOL_CONFIG.get_or_init(ToolConfig::from_env)
}

fn read_millis(value: Option<String>, key: &str) -> Option<Duration> {
    let raw = value?;
    match raw.parse::<u64>() {
        Ok(millis) => Some(Duration::from_millis(millis)),
        Err(_) => {
            warn!("event=config_load module=tools status=fallback key={key}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ToolConfig, ENV_FINAL_SETTLE_MS, ENV_LOG_DIR, ENV_SETTLE_MS, ENV_TIME_ZONE};
    use availgrid_core::{DisplayZone, SubmissionPacing};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> ToolConfig {
        let env = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        ToolConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.pacing, SubmissionPacing::default());
        assert_eq!(config.resolve_zone(None).unwrap(), DisplayZone::Local);
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let config = config_from(&[
            (ENV_TIME_ZONE, " Europe/Berlin "),
            (ENV_LOG_DIR, "   "),
            (ENV_SETTLE_MS, "150"),
            (ENV_FINAL_SETTLE_MS, "soon"),
        ]);
        assert_eq!(config.time_zone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.pacing.settle, Duration::from_millis(150));
        assert_eq!(
            config.pacing.final_settle,
            SubmissionPacing::default().final_settle
        );
    }

    #[test]
    fn explicit_zone_wins_over_configured_zone() {
        let config = config_from(&[(ENV_TIME_ZONE, "Mars/Base")]);
        assert!(config.resolve_zone(None).is_err());
        let zone = config.resolve_zone(Some("UTC")).unwrap();
        assert_eq!(zone, "UTC".parse::<DisplayZone>().unwrap());
        assert_ne!(zone, DisplayZone::Local);
    }
}
