//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod calendar;
pub mod config;
pub mod replay;

use chrono::NaiveDate;
use rollcall_core::CalendarConfig;

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub config: CalendarConfig,
    /// `--config` / `ROLLCALL_CONFIG` as given, before resolution
    pub config_arg: Option<String>,
    pub format: OutputFormat,
    pub quiet: bool,
    pub today: NaiveDate,
}
