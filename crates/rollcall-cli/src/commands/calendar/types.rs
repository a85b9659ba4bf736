//! Calendar command types
//!
//! Types for calendar commands and display.

use clap::Subcommand;
use rollcall_core::{TimeUnit, ViewType};
use serde::Serialize;
use tabled::Tabled;

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show the header label for a view
    Label {
        /// Focus date (YYYY-MM-DD, today, yesterday), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// View type: daily, weekly, monthly or range
        #[arg(long, default_value = "daily")]
        view: ViewType,

        /// Range start (range view only)
        #[arg(long)]
        from: Option<String>,

        /// Range end (range view only); omit for an open range
        #[arg(long)]
        to: Option<String>,
    },

    /// Expand a view type around a date into a concrete selection
    Expand {
        /// Anchor date, defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// View type: daily, weekly or monthly
        #[arg(long, default_value = "weekly")]
        view: ViewType,
    },

    /// Classify a range as weekly, monthly or custom
    Detect {
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },

    /// Move a date by whole days, weeks or months
    Shift {
        /// Date to move, defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Unit: day, week or month
        #[arg(short, long, default_value = "day")]
        unit: TimeUnit,

        /// Number of units, negative to go back
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        amount: i32,
    },

    /// Show the month grid around a date
    Grid {
        /// Any date in the month, defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Highlight a range starting here
        #[arg(long)]
        from: Option<String>,

        /// Highlight a range ending here
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct LabelRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "View")]
    pub view: String,
    #[tabled(rename = "Label")]
    pub label: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct RangeRow {
    #[tabled(rename = "View")]
    pub view: String,
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "To")]
    pub to: String,
    #[tabled(rename = "Days")]
    pub days: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct PatternRow {
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "To")]
    pub to: String,
    #[tabled(rename = "Days")]
    pub days: i64,
    #[tabled(rename = "Pattern")]
    pub pattern: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ShiftRow {
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "Step")]
    pub step: String,
    #[tabled(rename = "Result")]
    pub result: String,
}

/// One calendar week of rendered day cells
#[derive(Debug, Serialize, Tabled)]
pub struct WeekRow {
    #[tabled(rename = "Mon")]
    pub mon: String,
    #[tabled(rename = "Tue")]
    pub tue: String,
    #[tabled(rename = "Wed")]
    pub wed: String,
    #[tabled(rename = "Thu")]
    pub thu: String,
    #[tabled(rename = "Fri")]
    pub fri: String,
    #[tabled(rename = "Sat")]
    pub sat: String,
    #[tabled(rename = "Sun")]
    pub sun: String,
}
