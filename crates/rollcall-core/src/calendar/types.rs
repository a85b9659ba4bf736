//! Calendar selection types
//!
//! Value types shared by the engine, view sync and the label/grid helpers.
//! All of them are cheap `Copy` values and are rebuilt from scratch on every
//! gesture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range_math::{self, TimeUnit};

// ============================================================================
// Selection
// ============================================================================

/// What the user has picked so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Nothing selected
    #[default]
    Empty,
    /// A single day (single mode, or a daily expansion)
    Single { date: NaiveDate },
    /// A range waiting for its second click; `from` is the anchor
    Open { from: NaiveDate },
    /// A finished range, always `from <= to`
    Complete { from: NaiveDate, to: NaiveDate },
}

impl Selection {
    /// Build a completed range from two dates in any order
    pub fn complete(a: NaiveDate, b: NaiveDate) -> Self {
        let (from, to) = range_math::normalize(a, b);
        Selection::Complete { from, to }
    }

    /// The date an open range was started from
    pub fn anchor(&self) -> Option<NaiveDate> {
        match self {
            Selection::Open { from } => Some(*from),
            _ => None,
        }
    }

    /// Start of the selection, if any
    pub fn from(&self) -> Option<NaiveDate> {
        match self {
            Selection::Empty => None,
            Selection::Single { date } => Some(*date),
            Selection::Open { from } | Selection::Complete { from, .. } => Some(*from),
        }
    }

    /// End of the selection; `None` while a range is still open
    pub fn to(&self) -> Option<NaiveDate> {
        match self {
            Selection::Single { date } => Some(*date),
            Selection::Complete { to, .. } => Some(*to),
            Selection::Empty | Selection::Open { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Complete { .. })
    }

    /// Inclusive day count of a single or completed selection
    pub fn span_days(&self) -> Option<i64> {
        match (self.from(), self.to()) {
            (Some(from), Some(to)) => Some(range_math::span_days(from, to)),
            _ => None,
        }
    }

    /// Whether `date` falls inside a single or completed selection
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.from(), self.to()) {
            (Some(from), Some(to)) => range_math::in_interval(date, from, to),
            _ => false,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Empty => write!(f, "-"),
            Selection::Single { date } => write!(f, "{}", date),
            Selection::Open { from } => write!(f, "{} ..", from),
            Selection::Complete { from, to } => write!(f, "{} .. {}", from, to),
        }
    }
}

// ============================================================================
// Hover Preview
// ============================================================================

/// Transient projection of the range a click on `candidate_end` would make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverPreview {
    pub from: NaiveDate,
    pub candidate_end: NaiveDate,
    /// Whether committing the preview would stay within the max span
    pub valid: bool,
}

impl HoverPreview {
    pub fn new(from: NaiveDate, candidate_end: NaiveDate, max_span_days: u32) -> Self {
        let valid = range_math::clamp_span(from, candidate_end, max_span_days).is_ok();
        Self {
            from,
            candidate_end,
            valid,
        }
    }

    /// The previewed range in calendar order
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        range_math::normalize(self.from, self.candidate_end)
    }

    pub fn span_days(&self) -> i64 {
        let (from, to) = self.range();
        range_math::span_days(from, to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (from, to) = self.range();
        range_math::in_interval(date, from, to)
    }
}

// ============================================================================
// Mode / View Type
// ============================================================================

/// How clicks are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Single,
    Range,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Single => write!(f, "single"),
            Mode::Range => write!(f, "range"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Mode::Single),
            "range" => Ok(Mode::Range),
            _ => Err(format!("Unknown mode: {}. Use 'single' or 'range'", s)),
        }
    }
}

/// Display granularity of the attendance calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    #[default]
    Daily,
    Weekly,
    Monthly,
    /// Explicit multi-day range picked by the user
    Range,
}

impl ViewType {
    /// Step used by previous/next navigation.
    ///
    /// The range view pages through the month grid.
    pub fn navigation_unit(&self) -> TimeUnit {
        match self {
            ViewType::Daily => TimeUnit::Day,
            ViewType::Weekly => TimeUnit::Week,
            ViewType::Monthly | ViewType::Range => TimeUnit::Month,
        }
    }
}

impl std::fmt::Display for ViewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewType::Daily => write!(f, "daily"),
            ViewType::Weekly => write!(f, "weekly"),
            ViewType::Monthly => write!(f, "monthly"),
            ViewType::Range => write!(f, "range"),
        }
    }
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(ViewType::Daily),
            "weekly" | "week" => Ok(ViewType::Weekly),
            "monthly" | "month" => Ok(ViewType::Monthly),
            "range" | "custom" => Ok(ViewType::Range),
            _ => Err(format!(
                "Unknown view type: {}. Use daily, weekly, monthly or range",
                s
            )),
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Optional inclusive limits on selectable and navigable dates.
///
/// Bounds are assumed consistent (`min <= max`); configuration loading
/// rejects inverted bounds before they reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<NaiveDate>,
}

impl Bounds {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Tighten `max` so nothing after `today` can be picked
    pub fn capped_at(&self, today: NaiveDate) -> Self {
        let max = match self.max {
            Some(max) => max.min(today),
            None => today,
        };
        Self { min: self.min, max: Some(max) }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        !self.contains(date)
    }

    /// Pull `date` back inside the bounds
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.min.map_or(date, |min| date.max(min));
        self.max.map_or(date, |max| date.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_selection_complete_normalizes() {
        let sel = Selection::complete(d("2024-01-08"), d("2024-01-01"));
        assert_eq!(sel.from(), Some(d("2024-01-01")));
        assert_eq!(sel.to(), Some(d("2024-01-08")));
        assert_eq!(sel.span_days(), Some(8));
    }

    #[test]
    fn test_selection_accessors() {
        let open = Selection::Open { from: d("2024-01-01") };
        assert!(open.is_open());
        assert_eq!(open.anchor(), Some(d("2024-01-01")));
        assert_eq!(open.to(), None);
        assert_eq!(open.span_days(), None);
        assert!(!open.contains(d("2024-01-01")));

        let single = Selection::Single { date: d("2024-01-05") };
        assert_eq!(single.span_days(), Some(1));
        assert!(single.contains(d("2024-01-05")));
        assert_eq!(single.anchor(), None);

        assert!(Selection::default().is_empty());
    }

    #[test]
    fn test_selection_serialization() {
        let sel = Selection::Open { from: d("2024-03-15") };
        let json = serde_json::to_string(&sel).unwrap();
        assert_eq!(json, r#"{"kind":"open","from":"2024-03-15"}"#);

        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sel);
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::Empty.to_string(), "-");
        assert_eq!(
            Selection::complete(d("2024-01-01"), d("2024-01-07")).to_string(),
            "2024-01-01 .. 2024-01-07"
        );
    }

    #[test]
    fn test_hover_preview_validity() {
        let from = d("2024-01-01");
        assert!(!HoverPreview::new(from, d("2024-02-10"), 31).valid);
        assert!(HoverPreview::new(from, d("2024-01-20"), 31).valid);
        assert!(HoverPreview::new(from, d("2024-01-31"), 31).valid);
        assert!(!HoverPreview::new(from, d("2024-02-01"), 31).valid);
    }

    #[test]
    fn test_hover_preview_backwards() {
        let preview = HoverPreview::new(d("2024-01-10"), d("2024-01-05"), 31);
        assert_eq!(preview.range(), (d("2024-01-05"), d("2024-01-10")));
        assert_eq!(preview.span_days(), 6);
        assert!(preview.contains(d("2024-01-07")));
    }

    #[test]
    fn test_view_type_parse_and_display() {
        for view in [
            ViewType::Daily,
            ViewType::Weekly,
            ViewType::Monthly,
            ViewType::Range,
        ] {
            assert_eq!(view.to_string().parse::<ViewType>().unwrap(), view);
        }
        assert!("yearly".parse::<ViewType>().is_err());
    }

    #[test]
    fn test_view_type_navigation_unit() {
        assert_eq!(ViewType::Daily.navigation_unit(), TimeUnit::Day);
        assert_eq!(ViewType::Weekly.navigation_unit(), TimeUnit::Week);
        assert_eq!(ViewType::Monthly.navigation_unit(), TimeUnit::Month);
        assert_eq!(ViewType::Range.navigation_unit(), TimeUnit::Month);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("RANGE".parse::<Mode>().unwrap(), Mode::Range);
        assert_eq!("single".parse::<Mode>().unwrap(), Mode::Single);
        assert!("multi".parse::<Mode>().is_err());
    }

    #[test]
    fn test_bounds_contains_and_clamp() {
        let bounds = Bounds::new(Some(d("2024-01-05")), Some(d("2024-01-25")));
        assert!(bounds.contains(d("2024-01-05")));
        assert!(bounds.contains(d("2024-01-25")));
        assert!(bounds.is_disabled(d("2024-01-04")));
        assert!(bounds.is_disabled(d("2024-01-26")));
        assert_eq!(bounds.clamp(d("2024-01-01")), d("2024-01-05"));
        assert_eq!(bounds.clamp(d("2024-02-01")), d("2024-01-25"));
        assert_eq!(bounds.clamp(d("2024-01-10")), d("2024-01-10"));

        let open = Bounds::unbounded();
        assert!(open.contains(NaiveDate::MIN));
        assert!(open.contains(NaiveDate::MAX));
    }

    #[test]
    fn test_bounds_capped_at_today() {
        let today = d("2024-06-15");
        assert_eq!(Bounds::unbounded().capped_at(today).max, Some(today));

        let earlier = Bounds::new(None, Some(d("2024-06-01")));
        assert_eq!(earlier.capped_at(today).max, Some(d("2024-06-01")));

        let later = Bounds::new(None, Some(d("2024-12-31")));
        assert_eq!(later.capped_at(today).max, Some(today));
    }
}
