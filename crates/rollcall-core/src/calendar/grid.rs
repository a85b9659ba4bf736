//! Month grid
//!
//! Per-cell flags for the six-week, Monday-first day grid around the focus
//! month. Rebuilt from scratch on every call; cells carry no identity.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::engine::CalendarState;
use super::range_math::{month_bounds, week_bounds};
use super::types::Selection;
use crate::config::CalendarConfig;

/// Rows in the grid
pub const GRID_WEEKS: usize = 6;

/// Cells in the grid
pub const GRID_CELLS: usize = GRID_WEEKS * 7;

/// Render flags for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Belongs to the focus month rather than a neighbouring one
    pub in_month: bool,
    pub is_today: bool,
    pub disabled: bool,
    /// Single selection or an endpoint of the range
    pub selected: bool,
    /// Inside a completed range, endpoints included
    pub in_range: bool,
    /// Inside the hover preview, endpoints included
    pub in_preview: bool,
    /// Validity of the preview this cell belongs to
    pub preview_valid: bool,
}

/// Build the grid for `state.focus`'s month
pub fn month_grid(state: &CalendarState, config: &CalendarConfig, today: NaiveDate) -> Vec<DayCell> {
    let bounds = config.effective_bounds(today);
    let (month_start, month_end) = month_bounds(state.focus);
    let (grid_start, _) = week_bounds(month_start);

    (0..GRID_CELLS)
        .filter_map(|offset| grid_start.checked_add_signed(Duration::days(offset as i64)))
        .map(|date| {
            let preview = state.hover.filter(|h| h.contains(date));
            DayCell {
                date,
                in_month: month_start <= date && date <= month_end,
                is_today: date == today,
                disabled: bounds.is_disabled(date),
                selected: is_endpoint(&state.selection, date),
                in_range: state.selection.is_complete() && state.selection.contains(date),
                in_preview: preview.is_some(),
                preview_valid: preview.map_or(false, |h| h.valid),
            }
        })
        .collect()
}

fn is_endpoint(selection: &Selection, date: NaiveDate) -> bool {
    match selection {
        Selection::Empty => false,
        Selection::Single { date: picked } => *picked == date,
        Selection::Open { from } => *from == date,
        Selection::Complete { from, to } => *from == date || *to == date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::types::HoverPreview;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn cell(grid: &[DayCell], date: &str) -> DayCell {
        *grid.iter().find(|c| c.date == d(date)).unwrap()
    }

    #[test]
    fn test_grid_shape() {
        let config = CalendarConfig::default();
        // February 2024 starts on a Thursday
        let state = CalendarState::new(&config, d("2024-02-14"));
        let grid = month_grid(&state, &config, d("2024-02-14"));

        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid[0].date, d("2024-01-29"));
        assert_eq!(grid[GRID_CELLS - 1].date, d("2024-03-10"));
        assert_eq!(grid.iter().filter(|c| c.in_month).count(), 29);
        assert!(cell(&grid, "2024-02-14").is_today);
    }

    #[test]
    fn test_grid_month_starting_on_monday() {
        let config = CalendarConfig::default();
        let state = CalendarState::new(&config, d("2024-01-20"));
        let grid = month_grid(&state, &config, d("2024-01-20"));
        assert_eq!(grid[0].date, d("2024-01-01"));
    }

    #[test]
    fn test_grid_marks_completed_range() {
        let config = CalendarConfig::range(31);
        let state = CalendarState::new(&config, d("2024-01-15"))
            .with_selection(
                &config,
                d("2024-01-15"),
                Selection::complete(d("2024-01-08"), d("2024-01-12")),
            );
        let grid = month_grid(&state, &config, d("2024-01-15"));

        assert!(cell(&grid, "2024-01-08").selected);
        assert!(cell(&grid, "2024-01-12").selected);
        assert!(!cell(&grid, "2024-01-10").selected);
        assert!(cell(&grid, "2024-01-10").in_range);
        assert!(!cell(&grid, "2024-01-13").in_range);
    }

    #[test]
    fn test_grid_marks_preview() {
        let config = CalendarConfig::range(31);
        let mut state = CalendarState::new(&config, d("2024-01-15"))
            .with_selection(&config, d("2024-01-15"), Selection::Open { from: d("2024-01-20") });
        state.hover = Some(HoverPreview::new(d("2024-01-20"), d("2024-01-17"), 31));
        let grid = month_grid(&state, &config, d("2024-01-15"));

        assert!(cell(&grid, "2024-01-20").selected);
        assert!(cell(&grid, "2024-01-18").in_preview);
        assert!(cell(&grid, "2024-01-18").preview_valid);
        assert!(!cell(&grid, "2024-01-16").in_preview);
        assert!(!cell(&grid, "2024-01-18").in_range);
    }

    #[test]
    fn test_grid_marks_disabled_days() {
        let config = CalendarConfig {
            disable_future: true,
            ..CalendarConfig::default()
        }
        .with_bounds(Some(d("2024-01-03")), None);
        let state = CalendarState::new(&config, d("2024-01-15"));
        let grid = month_grid(&state, &config, d("2024-01-15"));

        assert!(cell(&grid, "2024-01-02").disabled);
        assert!(!cell(&grid, "2024-01-03").disabled);
        assert!(!cell(&grid, "2024-01-15").disabled);
        assert!(cell(&grid, "2024-01-16").disabled);
    }
}
