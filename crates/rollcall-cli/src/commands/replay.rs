//! Replay command
//!
//! Feeds a gesture script through a single selection engine, acting as the
//! host: overflow warnings are surfaced to the user and view type proposals
//! can be accepted automatically. Accepting a proposal focuses the start of
//! the completed range before switching the view.
//!
//! Scripts are either a JSON array of gestures or one gesture per line:
//!
//! ```text
//! # pick the first week of January
//! mode range
//! click 2024-01-01
//! hover 2024-01-05
//! click 2024-01-07
//! ```

use std::io::Read;

use anyhow::{Context as _, Result};
use clap::Args;
use rollcall_core::{
    CalendarObserver, CalendarState, FixedClock, Gesture, HoverPreview, Mode, Notification,
    SelectionEngine, SpanOverflow, ViewType,
};
use serde::Serialize;
use tabled::Tabled;

use super::calendar::helpers::date_cell;
use super::Context;
use crate::output::{print_json, print_note, print_output, print_warning, OutputFormat};

#[derive(Args)]
pub struct ReplayArgs {
    /// Gesture script file, or - to read stdin
    pub script: String,

    /// Override the configured selection mode
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Override the configured maximum range span in days
    #[arg(long)]
    pub max_span: Option<u32>,

    /// Override the initial view type
    #[arg(long)]
    pub view: Option<ViewType>,

    /// Apply view type proposals as soon as they are made
    #[arg(long)]
    pub accept_proposals: bool,

    /// Only show the final state
    #[arg(long)]
    pub summary: bool,
}

/// Table row for one replayed gesture
#[derive(Debug, Serialize, Tabled)]
pub struct StepRow {
    #[tabled(rename = "#")]
    pub step: usize,
    #[tabled(rename = "Gesture")]
    pub gesture: String,
    #[tabled(rename = "Selection")]
    pub selection: String,
    #[tabled(rename = "Hover")]
    pub hover: String,
    #[tabled(rename = "Focus")]
    pub focus: String,
    #[tabled(rename = "View")]
    pub view: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Events")]
    pub events: String,
}

/// JSON record for one replayed gesture
#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub gesture: Gesture,
    pub state: CalendarState,
    pub label: String,
    pub notifications: Vec<Notification>,
}

/// Host side of the callback contract
#[derive(Default)]
struct ReplayHost {
    proposal: Option<ViewType>,
    warnings: Vec<String>,
}

impl CalendarObserver for ReplayHost {
    fn on_view_type_proposed(&mut self, view_type: ViewType) {
        self.proposal = Some(view_type);
    }

    fn on_span_exceeded(&mut self, overflow: SpanOverflow) {
        self.warnings.push(format!(
            "Ranges are limited to {} days ({} selected); starting a new range",
            overflow.max, overflow.span
        ));
    }
}

pub fn execute(ctx: &Context, args: ReplayArgs) -> Result<()> {
    let raw = read_script(&args.script)?;
    let gestures = parse_script(&raw)?;

    let mut config = ctx.config.clone();
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(max_span) = args.max_span {
        config.max_span_days = max_span;
    }
    if let Some(view) = args.view {
        config.initial_view = view;
    }
    let config = config.validate()?;

    let mut engine = SelectionEngine::with_clock(config, FixedClock(ctx.today));
    let mut host = ReplayHost::default();
    let mut records = Vec::with_capacity(gestures.len());

    for (index, gesture) in gestures.into_iter().enumerate() {
        let mut notifications = engine.dispatch_to(gesture, &mut host);

        if let Some(proposal) = host.proposal.take() {
            if args.accept_proposals {
                log::info!("Accepting proposed view type: {}", proposal);
                if let Some(from) = engine.selection().from() {
                    notifications.extend(engine.dispatch_to(Gesture::Focus(from), &mut host));
                }
                notifications.extend(engine.dispatch_to(Gesture::SetViewType(proposal), &mut host));
            }
        }
        for warning in host.warnings.drain(..) {
            print_warning(&format!("step {}: {}", index + 1, warning), ctx.quiet);
        }

        records.push(StepRecord {
            step: index + 1,
            gesture,
            state: *engine.state(),
            label: engine.label(),
            notifications,
        });
    }

    let total = records.len();
    if args.summary {
        records = records.split_off(total.saturating_sub(1));
    }

    match ctx.format {
        OutputFormat::Json => print_json(&records)?,
        OutputFormat::Table => {
            let rows: Vec<StepRow> = records.iter().map(step_row).collect();
            print_output(&rows, ctx.format)?;
            print_note(&format!("Replayed {} gestures", total), ctx.quiet);
        }
    }
    Ok(())
}

fn read_script(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read gesture script from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read gesture script {}", source))
    }
}

/// Parse a JSON gesture array or a line-per-gesture script
pub fn parse_script(raw: &str) -> Result<Vec<Gesture>> {
    if raw.trim_start().starts_with('[') {
        return serde_json::from_str(raw).context("Invalid JSON gesture script");
    }

    let mut gestures = Vec::new();
    for (number, line) in raw.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let gesture = line
            .parse::<Gesture>()
            .with_context(|| format!("line {}: cannot parse '{}'", number + 1, line))?;
        gestures.push(gesture);
    }
    Ok(gestures)
}

fn hover_cell(hover: Option<HoverPreview>) -> String {
    match hover {
        Some(h) if h.valid => format!("{} ({}d)", h.candidate_end, h.span_days()),
        Some(h) => format!("{} ({}d, too long)", h.candidate_end, h.span_days()),
        None => "-".to_string(),
    }
}

fn step_row(record: &StepRecord) -> StepRow {
    StepRow {
        step: record.step,
        gesture: record.gesture.to_string(),
        selection: record.state.selection.to_string(),
        hover: hover_cell(record.state.hover),
        focus: date_cell(Some(record.state.focus)),
        view: record.state.view_type.to_string(),
        label: record.label.clone(),
        events: record
            .notifications
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
