//! Attendance calendar selection
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ SelectionEngine (engine)                      │
//! │   - transition(config, state, gesture, today) │
//! │   - CalendarObserver callbacks                │
//! └───────────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐    ┌──────────────────────┐
//! │ range_math      │◄───│ view_sync            │
//! │  span / shift   │    │  detect / expand     │
//! └─────────────────┘    └──────────────────────┘
//!          ▲
//!          │
//! ┌─────────────────┐    ┌──────────────────────┐
//! │ grid            │    │ label                │
//! │  DayCell flags  │    │  header strings      │
//! └─────────────────┘    └──────────────────────┘
//! ```
//!
//! Everything here works on `chrono::NaiveDate`, so comparisons are by
//! calendar day. Hosts holding timestamps convert them with
//! [`clock::calendar_day`] first.

pub mod clock;
pub mod engine;
pub mod grid;
pub mod label;
pub mod range_math;
pub mod types;
pub mod view_sync;

pub use clock::{calendar_day, Clock, FixedClock, SystemClock};
pub use engine::{
    notify, transition, CalendarObserver, CalendarState, Gesture, NoopObserver, Notification,
    SelectionEngine, Transition,
};
pub use grid::{month_grid, DayCell, GRID_CELLS, GRID_WEEKS};
pub use label::display_label;
pub use range_math::{
    clamp_span, in_interval, month_bounds, normalize, shift, span_days, week_bounds, SpanOverflow,
    TimeUnit,
};
pub use types::{Bounds, HoverPreview, Mode, Selection, ViewType};
pub use view_sync::{detect_pattern, expand_for_view, sync_on_completion};
