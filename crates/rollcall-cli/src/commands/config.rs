//! Config commands
//!
//! Commands for inspecting the calendar configuration.

use anyhow::Result;
use clap::Subcommand;
use rollcall_core::config::{resolve_config_path, CONFIG_ENV_VAR};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_note, print_output};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print which configuration file applies
    Path,
}

/// Config row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

pub fn execute(ctx: &Context, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(ctx),
        ConfigAction::Path => show_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let rows = get_all_config(ctx)?;
    print_output(&rows, ctx.format)
}

fn show_path(ctx: &Context) -> Result<()> {
    let path = resolve_config_path(ctx.config_arg.as_deref())?;
    let state = if path.exists() { "found" } else { "not found, using defaults" };
    print_note(&format!("{} ({})", path.display(), state), ctx.quiet);
    Ok(())
}

fn get_all_config(ctx: &Context) -> Result<Vec<ConfigRow>> {
    let path = resolve_config_path(ctx.config_arg.as_deref())?;
    let source = if !path.exists() {
        "default"
    } else if ctx.config_arg.is_some() || std::env::var(CONFIG_ENV_VAR).is_ok() {
        "env/flag"
    } else {
        "file"
    };

    let config = &ctx.config;
    let bounds = ctx.config.effective_bounds(ctx.today);
    let date_or_none = |d: Option<chrono::NaiveDate>| {
        d.map_or_else(|| "none".to_string(), |d| d.to_string())
    };

    Ok(vec![
        ConfigRow {
            key: "config_path".to_string(),
            value: path.display().to_string(),
            source: source.to_string(),
        },
        ConfigRow {
            key: "mode".to_string(),
            value: config.mode.to_string(),
            source: source.to_string(),
        },
        ConfigRow {
            key: "max_span_days".to_string(),
            value: config.max_span_days.to_string(),
            source: source.to_string(),
        },
        ConfigRow {
            key: "initial_view".to_string(),
            value: config.initial_view.to_string(),
            source: source.to_string(),
        },
        ConfigRow {
            key: "disable_future".to_string(),
            value: config.disable_future.to_string(),
            source: source.to_string(),
        },
        ConfigRow {
            key: "min_date".to_string(),
            value: date_or_none(bounds.min),
            source: source.to_string(),
        },
        ConfigRow {
            key: "max_date".to_string(),
            value: date_or_none(bounds.max),
            source: if config.disable_future { "today" } else { source }.to_string(),
        },
        ConfigRow {
            key: "today".to_string(),
            value: ctx.today.to_string(),
            source: "clock".to_string(),
        },
    ])
}
