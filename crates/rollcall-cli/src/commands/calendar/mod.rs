//! Calendar commands
//!
//! One-shot queries against the calendar logic: labels, view expansion,
//! pattern detection, date shifting and the month grid.

pub mod helpers;
mod types;

use anyhow::Result;
use rollcall_core::calendar::{normalize, shift, span_days};
use rollcall_core::{
    detect_pattern, display_label, expand_for_view, month_grid, CalendarState, Selection,
};

use crate::commands::Context;
use crate::output::{print_json, print_output, print_single, OutputFormat};

use helpers::{date_cell, date_or_today, parse_date, selection_from_args, week_rows};

// Re-export public types
pub use types::CalendarAction;
use types::{LabelRow, PatternRow, RangeRow, ShiftRow};

pub fn execute(ctx: &Context, action: CalendarAction) -> Result<()> {
    match action {
        CalendarAction::Label { date, view, from, to } => {
            let focus = date_or_today(date.as_deref(), ctx.today)?;
            let selection = selection_from_args(from.as_deref(), to.as_deref(), ctx.today)?;
            let row = LabelRow {
                date: focus.to_string(),
                view: view.to_string(),
                label: display_label(focus, view, &selection),
            };
            print_single(&row, ctx.format)
        }
        CalendarAction::Expand { date, view } => {
            let anchor = date_or_today(date.as_deref(), ctx.today)?;
            let selection = expand_for_view(anchor, view, &Selection::Empty);
            let row = RangeRow {
                view: view.to_string(),
                from: date_cell(selection.from()),
                to: date_cell(selection.to()),
                days: selection
                    .span_days()
                    .map_or_else(|| "-".to_string(), |days| days.to_string()),
            };
            print_single(&row, ctx.format)
        }
        CalendarAction::Detect { from, to } => {
            let (from, to) = normalize(parse_date(&from, ctx.today)?, parse_date(&to, ctx.today)?);
            let row = PatternRow {
                from: from.to_string(),
                to: to.to_string(),
                days: span_days(from, to),
                pattern: detect_pattern(from, to).to_string(),
            };
            print_single(&row, ctx.format)
        }
        CalendarAction::Shift { date, unit, amount } => {
            let from = date_or_today(date.as_deref(), ctx.today)?;
            let row = ShiftRow {
                from: from.to_string(),
                step: format!("{:+} {}", amount, unit),
                result: shift(from, unit, amount).to_string(),
            };
            print_single(&row, ctx.format)
        }
        CalendarAction::Grid { date, from, to } => {
            let focus = date_or_today(date.as_deref(), ctx.today)?;
            let selection = selection_from_args(from.as_deref(), to.as_deref(), ctx.today)?;
            let state = CalendarState {
                selection,
                ..CalendarState::new(&ctx.config, focus)
            };
            let cells = month_grid(&state, &ctx.config, ctx.today);

            match ctx.format {
                OutputFormat::Json => print_json(&cells),
                OutputFormat::Table => {
                    println!("{}", focus.format("%B %Y"));
                    print_output(&week_rows(&cells), ctx.format)
                }
            }
        }
    }
}
