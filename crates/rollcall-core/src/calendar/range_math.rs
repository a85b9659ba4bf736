//! Range math
//!
//! Pure calendar-day arithmetic shared by the selection engine, view sync and
//! the month grid. Nothing in here holds state.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Navigation step size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Day => write!(f, "day"),
            TimeUnit::Week => write!(f, "week"),
            TimeUnit::Month => write!(f, "month"),
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "days" | "d" => Ok(TimeUnit::Day),
            "week" | "weeks" | "w" => Ok(TimeUnit::Week),
            "month" | "months" | "m" => Ok(TimeUnit::Month),
            _ => Err(format!("Unknown time unit: {}. Use day, week or month", s)),
        }
    }
}

/// A range that would be longer than the configured maximum span
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("range of {span} days exceeds the {max}-day limit")]
pub struct SpanOverflow {
    pub span: i64,
    pub max: u32,
}

/// Inclusive day count between two ordered dates.
///
/// `from` must not be after `to`; call [`normalize`] first when the order
/// is unknown.
pub fn span_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}

/// Order two dates so the earlier one comes first
pub fn normalize(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Normalize two dates and check the resulting span against `max_days`.
///
/// Never truncates: an oversize range is reported as [`SpanOverflow`] and
/// the caller decides what to do with it.
pub fn clamp_span(
    a: NaiveDate,
    b: NaiveDate,
    max_days: u32,
) -> Result<(NaiveDate, NaiveDate), SpanOverflow> {
    let (from, to) = normalize(a, b);
    let span = span_days(from, to);
    if span > i64::from(max_days) {
        Err(SpanOverflow { span, max: max_days })
    } else {
        Ok((from, to))
    }
}

/// Move `date` by whole units.
///
/// Month steps keep the day-of-month when the target month has it and fall
/// back to that month's last day otherwise, so Jan 31 minus one month is
/// Feb 28 (or 29). Steps that would leave chrono's representable range
/// return `date` unchanged.
pub fn shift(date: NaiveDate, unit: TimeUnit, amount: i32) -> NaiveDate {
    let shifted = match unit {
        TimeUnit::Day => date.checked_add_signed(Duration::days(i64::from(amount))),
        TimeUnit::Week => date.checked_add_signed(Duration::weeks(i64::from(amount))),
        TimeUnit::Month => {
            let months = Months::new(amount.unsigned_abs());
            if amount >= 0 {
                date.checked_add_months(months)
            } else {
                date.checked_sub_months(months)
            }
        }
    };

    shifted.unwrap_or_else(|| {
        log::warn!(
            "[calendar:math] Shifting {} by {} {} leaves the calendar range",
            date,
            amount,
            unit
        );
        date
    })
}

/// Monday-to-Sunday week containing `date`.
///
/// In the first and last partial weeks of chrono's range the missing end
/// falls back to `date` itself.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday();
    let start = date
        .checked_sub_signed(Duration::days(i64::from(offset)))
        .unwrap_or(date);
    let end = date
        .checked_add_signed(Duration::days(i64::from(6 - offset)))
        .unwrap_or(date);
    (start, end)
}

/// First and last calendar day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Duration::days(i64::from(date.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// Inclusive containment test
pub fn in_interval(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    from <= date && date <= to
}
