//! Calendar configuration
//!
//! Host-supplied settings for one calendar widget, optionally loaded from a
//! JSON file. Resolution order for the file:
//!
//! 1. An explicit path (CLI `--config`, or `ROLLCALL_CONFIG`), `~` expanded
//! 2. `<config dir>/rollcall/calendar.json`
//! 3. Built-in defaults when no file exists

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{Bounds, Mode, ViewType};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default maximum inclusive span of a range selection
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 31;

/// Smallest usable span: a single day
pub const MIN_MAX_SPAN_DAYS: u32 = 1;

/// Environment variable overriding the configuration file path
pub const CONFIG_ENV_VAR: &str = "ROLLCALL_CONFIG";

const CONFIG_DIR_NAME: &str = "rollcall";
const CONFIG_FILE_NAME: &str = "calendar.json";

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// How clicks are interpreted
    pub mode: Mode,
    /// Inclusive day limit for a completed range
    pub max_span_days: u32,
    /// Dates outside these bounds are disabled
    pub bounds: Bounds,
    /// Treat every day after today as disabled
    pub disable_future: bool,
    /// View type the calendar opens with
    pub initial_view: ViewType,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
            bounds: Bounds::unbounded(),
            disable_future: false,
            initial_view: ViewType::Daily,
        }
    }
}

impl CalendarConfig {
    /// Range-mode configuration with the given span limit
    pub fn range(max_span_days: u32) -> Self {
        Self {
            mode: Mode::Range,
            max_span_days: max_span_days.max(MIN_MAX_SPAN_DAYS),
            initial_view: ViewType::Range,
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.bounds = Bounds::new(min, max);
        self
    }

    /// Validate and normalize the configuration
    pub fn validate(&self) -> Result<Self> {
        if let (Some(min), Some(max)) = (self.bounds.min, self.bounds.max) {
            if min > max {
                return Err(Error::config(format!(
                    "min bound {} is after max bound {}",
                    min, max
                )));
            }
        }

        Ok(Self {
            max_span_days: self.max_span_days.max(MIN_MAX_SPAN_DAYS),
            ..self.clone()
        })
    }

    /// Bounds in force on `today`, including the future-date lock
    pub fn effective_bounds(&self, today: NaiveDate) -> Bounds {
        if self.disable_future {
            self.bounds.capped_at(today)
        } else {
            self.bounds
        }
    }

    /// Load from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: CalendarConfig = serde_json::from_str(&raw)?;
        log::debug!("[calendar:config] Loaded configuration from {:?}", path);
        config.validate()
    }

    /// Load using the standard resolution order.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let path = resolve_config_path(explicit)?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::debug!(
                "[calendar:config] No configuration at {:?}, using defaults",
                path
            );
            Ok(Self::default())
        }
    }
}

/// Work out which configuration file applies
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf> {
    let from_env = std::env::var(CONFIG_ENV_VAR).ok();
    if let Some(raw) = explicit.map(str::to_string).or(from_env) {
        let expanded = shellexpand::full(&raw)
            .map_err(|e| Error::config(format!("Cannot expand config path {}: {}", raw, e)))?;
        return Ok(PathBuf::from(expanded.into_owned()));
    }

    let base = dirs::config_dir()
        .ok_or_else(|| Error::config("Could not determine the user config directory"))?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = CalendarConfig::default();
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.max_span_days, 31);
        assert_eq!(config.bounds, Bounds::unbounded());
        assert!(!config.disable_future);
    }

    #[test]
    fn test_range_config_enforces_minimum_span() {
        let config = CalendarConfig::range(0);
        assert_eq!(config.mode, Mode::Range);
        assert_eq!(config.max_span_days, MIN_MAX_SPAN_DAYS);
        assert_eq!(config.initial_view, ViewType::Range);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = CalendarConfig::default().with_bounds(Some(d("2024-02-01")), Some(d("2024-01-01")));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("after max bound"));
    }

    #[test]
    fn test_validate_normalizes_span() {
        let config = CalendarConfig {
            max_span_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap().max_span_days, 1);
    }

    #[test]
    fn test_effective_bounds_with_future_lock() {
        let today = d("2024-06-15");
        let mut config = CalendarConfig::default();
        assert_eq!(config.effective_bounds(today).max, None);

        config.disable_future = true;
        assert_eq!(config.effective_bounds(today).max, Some(today));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CalendarConfig =
            serde_json::from_str(r#"{"mode":"range","bounds":{"min":"2024-01-01"}}"#).unwrap();
        assert_eq!(config.mode, Mode::Range);
        assert_eq!(config.max_span_days, DEFAULT_MAX_SPAN_DAYS);
        assert_eq!(config.bounds.min, Some(d("2024-01-01")));
        assert_eq!(config.bounds.max, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"mode":"range","max_span_days":14,"disable_future":true}}"#
        )
        .unwrap();

        let config = CalendarConfig::load_from(file.path()).unwrap();
        assert_eq!(config.mode, Mode::Range);
        assert_eq!(config.max_span_days, 14);
        assert!(config.disable_future);
    }

    #[test]
    fn test_load_from_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            CalendarConfig::load_from(file.path()),
            Err(Error::Json(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_returns_defaults() {
        std::env::remove_var(CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let config = CalendarConfig::load(missing.to_str()).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.json");
        std::fs::write(&path, r#"{"max_span_days":7}"#).unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &path);
        let resolved = resolve_config_path(None);
        let config = CalendarConfig::load(None);
        std::env::remove_var(CONFIG_ENV_VAR);

        assert_eq!(resolved.unwrap(), path);
        assert_eq!(config.unwrap().max_span_days, 7);
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() {
        std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/env.json");
        let resolved = resolve_config_path(Some("/tmp/explicit.json"));
        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(resolved.unwrap(), PathBuf::from("/tmp/explicit.json"));
    }
}
