//! Selection engine
//!
//! Turns calendar gestures into the next selection state.
//!
//! # Architecture
//!
//! ```text
//!   host gesture ──► transition(config, state, gesture, today) ──► Transition
//!                          │                                         │
//!                          ├─ range_math (span, shift, bounds)       ├─ next CalendarState
//!                          └─ view_sync  (pattern on completion)     └─ Vec<Notification>
//!
//!   SelectionEngine = CalendarState + Clock + transition(), forwarding
//!   notifications to a CalendarObserver.
//! ```
//!
//! [`transition`] is pure: the whole next state is rebuilt from the previous
//! state and one gesture. [`SelectionEngine`] only adds ownership of that
//! state and the injected clock.
//!
//! Range-mode click protocol:
//!
//! - No open range (empty, or a range already completed): the click opens
//!   a new range at the clicked day.
//! - Open range: the two days are ordered and committed, unless the span
//!   exceeds `max_span_days`. An oversize range is never clipped; it is
//!   dropped and a fresh open range starts at the clicked day
//!   (overflow-restart).
//!
//! Disabled days (outside the effective bounds) never change state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::range_math::{self, SpanOverflow};
use super::types::{Bounds, HoverPreview, Mode, Selection, ViewType};
use super::view_sync;
use crate::config::CalendarConfig;
use crate::error::{Error, Result};

// ============================================================================
// Gestures
// ============================================================================

/// One user interaction delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Click(NaiveDate),
    Hover(NaiveDate),
    /// Pointer left the day grid
    MouseLeave,
    Clear,
    GoToToday,
    Previous,
    Next,
    /// Host moves the focus date directly
    Focus(NaiveDate),
    SetMode(Mode),
    SetViewType(ViewType),
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gesture::Click(date) => write!(f, "click {}", date),
            Gesture::Hover(date) => write!(f, "hover {}", date),
            Gesture::MouseLeave => write!(f, "leave"),
            Gesture::Clear => write!(f, "clear"),
            Gesture::GoToToday => write!(f, "today"),
            Gesture::Previous => write!(f, "prev"),
            Gesture::Next => write!(f, "next"),
            Gesture::Focus(date) => write!(f, "focus {}", date),
            Gesture::SetMode(mode) => write!(f, "mode {}", mode),
            Gesture::SetViewType(view) => write!(f, "view {}", view),
        }
    }
}

impl std::str::FromStr for Gesture {
    type Err = Error;

    /// Parse the compact script form, e.g. `click 2024-01-01` or `view weekly`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| Error::validation("empty gesture"))?
            .to_lowercase();
        let arg = parts.next();
        if let Some(extra) = parts.next() {
            return Err(Error::validation(format!(
                "unexpected argument '{}' in gesture '{}'",
                extra, s
            )));
        }

        let date = |arg: Option<&str>| -> Result<NaiveDate> {
            let raw = arg.ok_or_else(|| Error::validation(format!("'{}' needs a date", verb)))?;
            Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
        };

        let gesture = match verb.as_str() {
            "click" => Gesture::Click(date(arg)?),
            "hover" => Gesture::Hover(date(arg)?),
            "focus" => Gesture::Focus(date(arg)?),
            "leave" | "mouse_leave" => Gesture::MouseLeave,
            "clear" => Gesture::Clear,
            "today" => Gesture::GoToToday,
            "prev" | "previous" => Gesture::Previous,
            "next" => Gesture::Next,
            "mode" => {
                let raw = arg.ok_or_else(|| Error::validation("'mode' needs single or range"))?;
                Gesture::SetMode(raw.parse().map_err(Error::Validation)?)
            }
            "view" => {
                let raw = arg.ok_or_else(|| Error::validation("'view' needs a view type"))?;
                Gesture::SetViewType(raw.parse().map_err(Error::Validation)?)
            }
            other => return Err(Error::validation(format!("unknown gesture: {}", other))),
        };

        if arg.is_some()
            && matches!(
                gesture,
                Gesture::MouseLeave
                    | Gesture::Clear
                    | Gesture::GoToToday
                    | Gesture::Previous
                    | Gesture::Next
            )
        {
            return Err(Error::validation(format!("'{}' takes no argument", verb)));
        }

        Ok(gesture)
    }
}

// ============================================================================
// State / Notifications
// ============================================================================

/// Everything the calendar needs to render one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub mode: Mode,
    pub view_type: ViewType,
    pub selection: Selection,
    pub hover: Option<HoverPreview>,
    /// Day the calendar is showing; moved by navigation, not by range clicks
    pub focus: NaiveDate,
}

impl CalendarState {
    /// Fresh state: empty selection, no hover
    pub fn new(config: &CalendarConfig, focus: NaiveDate) -> Self {
        Self {
            mode: config.mode,
            view_type: config.initial_view,
            selection: Selection::Empty,
            hover: None,
            focus,
        }
    }

    /// Start from a host-supplied selection.
    ///
    /// The selection is checked the same way a click would be: it must fit
    /// the mode, every endpoint must be enabled under the bounds in force on
    /// `today`, and a completed range is reordered and must fit within
    /// `max_span_days`. Anything else is dropped.
    pub fn with_selection(
        mut self,
        config: &CalendarConfig,
        today: NaiveDate,
        selection: Selection,
    ) -> Self {
        let bounds = config.effective_bounds(today);
        match admit_selection(self.mode, config.max_span_days, &bounds, selection) {
            Ok(admitted) => self.selection = admitted,
            Err(reason) => {
                log::warn!(
                    "[calendar:engine] Ignoring initial selection {}: {}",
                    selection,
                    reason
                );
                self.selection = Selection::Empty;
            }
        }
        self
    }
}

fn admit_selection(
    mode: Mode,
    max_span_days: u32,
    bounds: &Bounds,
    selection: Selection,
) -> std::result::Result<Selection, String> {
    let selection = match (mode, selection) {
        (_, Selection::Empty) => return Ok(Selection::Empty),
        (Mode::Single, Selection::Single { date }) => Selection::Single { date },
        (Mode::Range, Selection::Open { from }) => Selection::Open { from },
        (Mode::Range, Selection::Complete { from, to }) => Selection::complete(from, to),
        (mode, _) => return Err(format!("does not fit {} mode", mode)),
    };

    for date in [selection.from(), selection.to()].into_iter().flatten() {
        if bounds.is_disabled(date) {
            return Err(format!("{} is outside the selectable bounds", date));
        }
    }

    if let Selection::Complete { from, to } = selection {
        range_math::clamp_span(from, to, max_span_days).map_err(|overflow| overflow.to_string())?;
    }

    Ok(selection)
}

/// Change reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    DateChanged { date: NaiveDate },
    RangeChanged { selection: Selection },
    ViewTypeChanged { view_type: ViewType },
    /// View sync suggests a view type; the host decides whether to apply it
    ViewTypeProposed { view_type: ViewType },
    /// A range was dropped by overflow-restart
    SpanExceeded { overflow: SpanOverflow },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::DateChanged { date } => write!(f, "date={}", date),
            Notification::RangeChanged { selection } => write!(f, "range={}", selection),
            Notification::ViewTypeChanged { view_type } => write!(f, "view={}", view_type),
            Notification::ViewTypeProposed { view_type } => write!(f, "propose={}", view_type),
            Notification::SpanExceeded { overflow } => write!(f, "overflow={}d", overflow.span),
        }
    }
}

/// Result of applying one gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: CalendarState,
    pub notifications: Vec<Notification>,
}

impl Transition {
    fn unchanged(state: &CalendarState) -> Self {
        Self {
            state: *state,
            notifications: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.notifications.is_empty()
    }
}

// ============================================================================
// Transition Function
// ============================================================================

/// Compute the state that follows `gesture`.
///
/// `today` is the injected current day, used by "go to today" and by the
/// future-date lock.
pub fn transition(
    config: &CalendarConfig,
    state: &CalendarState,
    gesture: Gesture,
    today: NaiveDate,
) -> Transition {
    let bounds = config.effective_bounds(today);
    let mut next = *state;
    let mut events = Vec::new();

    match gesture {
        Gesture::Click(date) => {
            if bounds.is_disabled(date) {
                log::debug!("[calendar:engine] Ignoring click on disabled day {}", date);
                return Transition::unchanged(state);
            }
            click(config, &mut next, date, &mut events);
        }
        Gesture::Hover(date) => {
            if bounds.is_disabled(date) {
                return Transition::unchanged(state);
            }
            next.hover = match (next.mode, next.selection) {
                (Mode::Range, Selection::Open { from }) => {
                    Some(HoverPreview::new(from, date, config.max_span_days))
                }
                _ => None,
            };
        }
        Gesture::MouseLeave => {
            if !next.selection.is_open() {
                next.hover = None;
            }
        }
        Gesture::Clear => {
            next.selection = Selection::Empty;
            next.hover = None;
        }
        Gesture::GoToToday => {
            if bounds.is_disabled(today) {
                log::debug!("[calendar:engine] Today ({}) is disabled", today);
                return Transition::unchanged(state);
            }
            next.focus = today;
            next.hover = None;
            next.selection = match next.mode {
                Mode::Single => Selection::Single { date: today },
                Mode::Range => Selection::Open { from: today },
            };
        }
        Gesture::Previous => navigate(&mut next, &bounds, -1),
        Gesture::Next => navigate(&mut next, &bounds, 1),
        Gesture::Focus(date) => {
            if bounds.is_disabled(date) {
                return Transition::unchanged(state);
            }
            next.focus = date;
        }
        Gesture::SetMode(mode) => {
            if mode != next.mode {
                next.mode = mode;
                next.selection = Selection::Empty;
                next.hover = None;
            }
        }
        Gesture::SetViewType(view_type) => {
            if view_type != next.view_type {
                if next.view_type == ViewType::Range && next.selection.is_open() {
                    next.selection = Selection::Empty;
                    next.hover = None;
                }
                next.view_type = view_type;
            }
        }
    }

    if next.focus != state.focus {
        events.insert(0, Notification::DateChanged { date: next.focus });
    }
    if next.selection != state.selection {
        events.push(Notification::RangeChanged {
            selection: next.selection,
        });
    }
    if next.view_type != state.view_type {
        events.push(Notification::ViewTypeChanged {
            view_type: next.view_type,
        });
    }
    if let Some(proposal) = completion_proposal(state, &next) {
        events.push(Notification::ViewTypeProposed {
            view_type: proposal,
        });
    }

    log::debug!(
        "[calendar:engine] {} -> selection={} hover={:?} focus={} ({} events)",
        gesture,
        next.selection,
        next.hover.map(|h| h.candidate_end),
        next.focus,
        events.len()
    );

    Transition {
        state: next,
        notifications: events,
    }
}

fn click(
    config: &CalendarConfig,
    next: &mut CalendarState,
    date: NaiveDate,
    events: &mut Vec<Notification>,
) {
    next.hover = None;

    if next.mode == Mode::Single {
        next.selection = Selection::Single { date };
        return;
    }

    next.selection = match next.selection {
        Selection::Open { from } => {
            match range_math::clamp_span(from, date, config.max_span_days) {
                Ok((from, to)) => Selection::Complete { from, to },
                Err(overflow) => {
                    log::info!(
                        "[calendar:engine] Restarting range at {}: {}",
                        date,
                        overflow
                    );
                    events.push(Notification::SpanExceeded { overflow });
                    Selection::Open { from: date }
                }
            }
        }
        Selection::Empty | Selection::Single { .. } | Selection::Complete { .. } => {
            Selection::Open { from: date }
        }
    };
}

fn navigate(next: &mut CalendarState, bounds: &Bounds, direction: i32) {
    let unit = next.view_type.navigation_unit();
    let target = range_math::shift(next.focus, unit, direction);
    next.focus = bounds.clamp(target);
}

/// View type suggestion for a range that just went from open to complete
fn completion_proposal(before: &CalendarState, after: &CalendarState) -> Option<ViewType> {
    if !(before.selection.is_open() && after.selection.is_complete()) {
        return None;
    }
    let proposal = view_sync::sync_on_completion(&after.selection, after.view_type);
    (proposal != after.view_type).then_some(proposal)
}

// ============================================================================
// Observer / Engine
// ============================================================================

/// Host callbacks; every method defaults to doing nothing
pub trait CalendarObserver {
    fn on_date_change(&mut self, _date: NaiveDate) {}
    fn on_range_change(&mut self, _selection: &Selection) {}
    fn on_view_type_change(&mut self, _view_type: ViewType) {}
    fn on_view_type_proposed(&mut self, _view_type: ViewType) {}
    fn on_span_exceeded(&mut self, _overflow: SpanOverflow) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CalendarObserver for NoopObserver {}

/// Deliver a notification to the matching observer callback
pub fn notify(observer: &mut dyn CalendarObserver, notification: &Notification) {
    match notification {
        Notification::DateChanged { date } => observer.on_date_change(*date),
        Notification::RangeChanged { selection } => observer.on_range_change(selection),
        Notification::ViewTypeChanged { view_type } => observer.on_view_type_change(*view_type),
        Notification::ViewTypeProposed { view_type } => {
            observer.on_view_type_proposed(*view_type)
        }
        Notification::SpanExceeded { overflow } => observer.on_span_exceeded(*overflow),
    }
}

/// One calendar widget's selection state
pub struct SelectionEngine<C: Clock = SystemClock> {
    config: CalendarConfig,
    state: CalendarState,
    clock: C,
}

impl SelectionEngine<SystemClock> {
    pub fn new(config: CalendarConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SelectionEngine<C> {
    /// Engine focused on the clock's today
    pub fn with_clock(config: CalendarConfig, clock: C) -> Self {
        let focus = config.effective_bounds(clock.today()).clamp(clock.today());
        let state = CalendarState::new(&config, focus);
        Self {
            config,
            state,
            clock,
        }
    }

    /// Engine resumed from a host-supplied state.
    ///
    /// The selection goes through [`CalendarState::with_selection`], the focus
    /// is pulled inside the bounds, and a hover survives only while it still
    /// belongs to the open range.
    pub fn with_state(config: CalendarConfig, state: CalendarState, clock: C) -> Self {
        let today = clock.today();
        let bounds = config.effective_bounds(today);
        let mut admitted = CalendarState {
            selection: Selection::Empty,
            hover: None,
            focus: bounds.clamp(state.focus),
            ..state
        }
        .with_selection(&config, today, state.selection);

        admitted.hover = state
            .hover
            .filter(|hover| {
                admitted.mode == Mode::Range
                    && admitted.selection.anchor() == Some(hover.from)
                    && !bounds.is_disabled(hover.candidate_end)
            })
            .map(|hover| HoverPreview::new(hover.from, hover.candidate_end, config.max_span_days));

        Self {
            config,
            state: admitted,
            clock,
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn hover(&self) -> Option<&HoverPreview> {
        self.state.hover.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Bounds in force right now
    pub fn bounds(&self) -> Bounds {
        self.config.effective_bounds(self.clock.today())
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.bounds().is_disabled(date)
    }

    /// Apply a gesture and return what changed
    pub fn dispatch(&mut self, gesture: Gesture) -> Vec<Notification> {
        let Transition {
            state,
            notifications,
        } = transition(&self.config, &self.state, gesture, self.clock.today());
        self.state = state;
        notifications
    }

    /// Apply a gesture and forward every notification to `observer`
    pub fn dispatch_to(
        &mut self,
        gesture: Gesture,
        observer: &mut dyn CalendarObserver,
    ) -> Vec<Notification> {
        let notifications = self.dispatch(gesture);
        for notification in &notifications {
            notify(observer, notification);
        }
        notifications
    }

    /// Header label for the current state
    pub fn label(&self) -> String {
        super::label::display_label(self.state.focus, self.state.view_type, &self.state.selection)
    }

    /// Selection the current view covers around the focus date
    pub fn visible_selection(&self) -> Selection {
        view_sync::expand_for_view(self.state.focus, self.state.view_type, &self.state.selection)
    }
}
