//! View type synchronisation
//!
//! Keeps the daily/weekly/monthly/range selector consistent with the range
//! the user actually picked, and expands a view type back into a concrete
//! selection for navigation.

use chrono::NaiveDate;

use super::range_math::{self, month_bounds, week_bounds};
use super::types::{Selection, ViewType};

/// Shortest span treated as a calendar month
pub const MONTH_MIN_DAYS: i64 = 28;

/// Longest span treated as a calendar month
pub const MONTH_MAX_DAYS: i64 = 31;

/// Span treated as a week
pub const WEEK_DAYS: i64 = 7;

/// Classify a range by its length.
///
/// Only the length matters: a 7-day range starting on a Thursday is still
/// weekly. Anything that is neither a week nor a month stays an explicit
/// `range`.
pub fn detect_pattern(from: NaiveDate, to: NaiveDate) -> ViewType {
    let (from, to) = range_math::normalize(from, to);
    match range_math::span_days(from, to) {
        WEEK_DAYS => ViewType::Weekly,
        MONTH_MIN_DAYS..=MONTH_MAX_DAYS => ViewType::Monthly,
        _ => ViewType::Range,
    }
}

/// View type to suggest once a range has just been completed.
///
/// Only a host sitting in manual `range` view gets a suggestion; every other
/// view type is returned unchanged.
pub fn sync_on_completion(selection: &Selection, current: ViewType) -> ViewType {
    match (current, selection) {
        (ViewType::Range, Selection::Complete { from, to }) => detect_pattern(*from, *to),
        _ => current,
    }
}

/// Concrete selection a view type covers around `anchor`.
///
/// The `range` view has no implicit extent, so `current` is returned as-is.
pub fn expand_for_view(anchor: NaiveDate, view_type: ViewType, current: &Selection) -> Selection {
    match view_type {
        ViewType::Daily => Selection::Single { date: anchor },
        ViewType::Weekly => {
            let (from, to) = week_bounds(anchor);
            Selection::Complete { from, to }
        }
        ViewType::Monthly => {
            let (from, to) = month_bounds(anchor);
            Selection::Complete { from, to }
        }
        ViewType::Range => *current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_detect_pattern_week() {
        assert_eq!(detect_pattern(d("2024-01-01"), d("2024-01-07")), ViewType::Weekly);
        assert_eq!(detect_pattern(d("2024-01-04"), d("2024-01-10")), ViewType::Weekly);
    }

    #[test]
    fn test_detect_pattern_month_lengths() {
        let from = d("2024-01-01");
        for (to, span) in [
            ("2024-01-28", 28),
            ("2024-01-29", 29),
            ("2024-01-30", 30),
            ("2024-01-31", 31),
        ] {
            assert_eq!(range_math::span_days(from, d(to)), span);
            assert_eq!(detect_pattern(from, d(to)), ViewType::Monthly, "span {}", span);
        }
    }

    #[test]
    fn test_detect_pattern_custom_spans() {
        let from = d("2024-01-01");
        assert_eq!(detect_pattern(from, d("2024-01-10")), ViewType::Range);
        assert_eq!(detect_pattern(from, d("2024-01-08")), ViewType::Range);
        assert_eq!(detect_pattern(from, d("2024-01-27")), ViewType::Range);
        assert_eq!(detect_pattern(from, from), ViewType::Range);
    }

    #[test]
    fn test_detect_pattern_ignores_order() {
        assert_eq!(detect_pattern(d("2024-01-07"), d("2024-01-01")), ViewType::Weekly);
    }

    #[test]
    fn test_sync_on_completion_from_range_view() {
        let week = Selection::complete(d("2024-01-01"), d("2024-01-07"));
        assert_eq!(sync_on_completion(&week, ViewType::Range), ViewType::Weekly);

        let month = Selection::complete(d("2024-02-01"), d("2024-02-29"));
        assert_eq!(sync_on_completion(&month, ViewType::Range), ViewType::Monthly);

        let custom = Selection::complete(d("2024-01-01"), d("2024-01-08"));
        assert_eq!(sync_on_completion(&custom, ViewType::Range), ViewType::Range);
    }

    #[test]
    fn test_sync_on_completion_leaves_other_views() {
        let week = Selection::complete(d("2024-01-01"), d("2024-01-07"));
        assert_eq!(sync_on_completion(&week, ViewType::Daily), ViewType::Daily);
        assert_eq!(sync_on_completion(&week, ViewType::Monthly), ViewType::Monthly);

        let open = Selection::Open { from: d("2024-01-01") };
        assert_eq!(sync_on_completion(&open, ViewType::Range), ViewType::Range);
    }

    #[test]
    fn test_expand_for_view() {
        let anchor = d("2024-02-14");
        let current = Selection::Open { from: d("2024-02-02") };

        assert_eq!(
            expand_for_view(anchor, ViewType::Daily, &current),
            Selection::Single { date: anchor }
        );
        assert_eq!(
            expand_for_view(anchor, ViewType::Weekly, &current),
            Selection::complete(d("2024-02-12"), d("2024-02-18"))
        );
        assert_eq!(
            expand_for_view(anchor, ViewType::Monthly, &current),
            Selection::complete(d("2024-02-01"), d("2024-02-29"))
        );
        assert_eq!(expand_for_view(anchor, ViewType::Range, &current), current);
    }

    #[test]
    fn test_expand_weekly_at_calendar_limits() {
        let first = expand_for_view(NaiveDate::MIN, ViewType::Weekly, &Selection::Empty);
        assert_eq!(first.from(), Some(NaiveDate::MIN));

        let last = expand_for_view(NaiveDate::MAX, ViewType::Weekly, &Selection::Empty);
        assert_eq!(last.to(), Some(NaiveDate::MAX));
        assert!(last.contains(NaiveDate::MAX));
    }
}
