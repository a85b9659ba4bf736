//! Header labels for the attendance calendar

use chrono::NaiveDate;

use super::range_math::week_bounds;
use super::types::{Selection, ViewType};

const DAY_FORMAT: &str = "%A, %B %-d, %Y";
const SHORT_FORMAT: &str = "%b %-d";
const SHORT_WITH_YEAR_FORMAT: &str = "%b %-d, %Y";
const MONTH_FORMAT: &str = "%B %Y";

/// Placeholder shown after the start of an open range
pub const OPEN_RANGE_PLACEHOLDER: &str = "(select end date)";

/// Shown in range view before anything is picked
pub const EMPTY_RANGE_PLACEHOLDER: &str = "Select a date range";

/// Human-readable header for the current view.
///
/// `selection` is only consulted by the range view; the other views
/// describe the period around `focus`.
pub fn display_label(focus: NaiveDate, view_type: ViewType, selection: &Selection) -> String {
    match view_type {
        ViewType::Daily => focus.format(DAY_FORMAT).to_string(),
        ViewType::Weekly => {
            let (start, end) = week_bounds(focus);
            format!(
                "{} – {}",
                start.format(SHORT_FORMAT),
                end.format(SHORT_WITH_YEAR_FORMAT)
            )
        }
        ViewType::Monthly => focus.format(MONTH_FORMAT).to_string(),
        ViewType::Range => range_label(selection),
    }
}

fn range_label(selection: &Selection) -> String {
    match selection {
        Selection::Empty => EMPTY_RANGE_PLACEHOLDER.to_string(),
        Selection::Single { date } => date.format(SHORT_WITH_YEAR_FORMAT).to_string(),
        Selection::Open { from } => format!(
            "{} – {}",
            from.format(SHORT_WITH_YEAR_FORMAT),
            OPEN_RANGE_PLACEHOLDER
        ),
        Selection::Complete { from, to } => format!(
            "{} – {}",
            from.format(SHORT_WITH_YEAR_FORMAT),
            to.format(SHORT_WITH_YEAR_FORMAT)
        ),
    }
}
