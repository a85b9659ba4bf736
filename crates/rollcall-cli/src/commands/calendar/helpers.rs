//! Calendar helper functions
//!
//! Date parsing and cell rendering shared by calendar and replay commands.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use rollcall_core::{DayCell, Selection};

use super::types::WeekRow;

/// Parse a date string into NaiveDate relative to `today`
pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    match s {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        "tomorrow" => Ok(today + Duration::days(1)),
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date format: {}. Use YYYY-MM-DD", s)),
    }
}

/// Parse an optional date, falling back to `today`
pub fn date_or_today(s: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    s.map_or(Ok(today), |raw| parse_date(raw, today))
}

/// Selection described by optional `--from` / `--to` flags
pub fn selection_from_args(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> Result<Selection> {
    let from = from.map(|s| parse_date(s, today)).transpose()?;
    let to = to.map(|s| parse_date(s, today)).transpose()?;
    match (from, to) {
        (None, None) => Ok(Selection::Empty),
        (Some(from), None) => Ok(Selection::Open { from }),
        (Some(from), Some(to)) => Ok(Selection::complete(from, to)),
        (None, Some(_)) => Err(anyhow::anyhow!("--to needs --from")),
    }
}

/// Short text for one grid cell.
///
/// `[d]` selected endpoint, `*d` inside a range, `~d` / `!d` inside a
/// valid / oversize preview, `(d)` today, `-` disabled, `.d` other month.
pub fn render_cell(cell: &DayCell) -> String {
    let day = cell.date.day();
    if cell.disabled {
        return "-".to_string();
    }
    let text = if cell.selected {
        format!("[{}]", day)
    } else if cell.in_range {
        format!("*{}", day)
    } else if cell.in_preview {
        let marker = if cell.preview_valid { '~' } else { '!' };
        format!("{}{}", marker, day)
    } else if cell.is_today {
        format!("({})", day)
    } else {
        day.to_string()
    };

    if cell.in_month {
        text
    } else {
        format!(".{}", text)
    }
}

/// Group grid cells into table rows, one per week
pub fn week_rows(cells: &[DayCell]) -> Vec<WeekRow> {
    cells
        .chunks(7)
        .filter(|week| week.len() == 7)
        .map(|week| WeekRow {
            mon: render_cell(&week[0]),
            tue: render_cell(&week[1]),
            wed: render_cell(&week[2]),
            thu: render_cell(&week[3]),
            fri: render_cell(&week[4]),
            sat: render_cell(&week[5]),
            sun: render_cell(&week[6]),
        })
        .collect()
}

/// Optional date as a table cell
pub fn date_cell(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plain(date: &str) -> DayCell {
        DayCell {
            date: d(date),
            in_month: true,
            is_today: false,
            disabled: false,
            selected: false,
            in_range: false,
            in_preview: false,
            preview_valid: false,
        }
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = d("2024-03-01");
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("yesterday", today).unwrap(), d("2024-02-29"));
        assert_eq!(parse_date("tomorrow", today).unwrap(), d("2024-03-02"));
    }

    #[test]
    fn test_parse_date_invalid() {
        let today = d("2024-03-01");
        assert!(parse_date("2024-02-30", today).is_err());
        assert!(parse_date("03/01/2024", today).is_err());
    }

    #[test]
    fn test_selection_from_args() {
        let today = d("2024-03-01");
        assert_eq!(selection_from_args(None, None, today).unwrap(), Selection::Empty);
        assert_eq!(
            selection_from_args(Some("2024-01-05"), None, today).unwrap(),
            Selection::Open { from: d("2024-01-05") }
        );
        assert_eq!(
            selection_from_args(Some("2024-01-05"), Some("2024-01-01"), today).unwrap(),
            Selection::complete(d("2024-01-01"), d("2024-01-05"))
        );
        assert!(selection_from_args(None, Some("2024-01-01"), today).is_err());
    }

    #[test]
    fn test_render_cell_markers() {
        let mut cell = plain("2024-01-09");
        assert_eq!(render_cell(&cell), "9");

        cell.is_today = true;
        assert_eq!(render_cell(&cell), "(9)");

        cell.in_preview = true;
        assert_eq!(render_cell(&cell), "!9");
        cell.preview_valid = true;
        assert_eq!(render_cell(&cell), "~9");

        cell.in_range = true;
        assert_eq!(render_cell(&cell), "*9");

        cell.selected = true;
        assert_eq!(render_cell(&cell), "[9]");

        cell.in_month = false;
        assert_eq!(render_cell(&cell), ".[9]");

        cell.disabled = true;
        assert_eq!(render_cell(&cell), "-");
    }

    #[test]
    fn test_date_cell() {
        assert_eq!(date_cell(None), "-");
        assert_eq!(date_cell(Some(d("2024-01-01"))), "2024-01-01");
    }
}
