//! # rollcall-core
//!
//! Calendar logic for Rollcall attendance views, shared by the CLI and any
//! other host.
//!
//! This crate provides:
//! - Date range math, the selection state machine and view sync (`calendar` module)
//! - Widget configuration (`config` module)
//! - Unified error handling (`error` module)
//!
//! Nothing here persists data or renders; a host feeds gestures in and draws
//! whatever state comes back.

pub mod calendar;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use config::CalendarConfig;
pub use error::{Error, Result};

// Re-export commonly used calendar types
pub use calendar::{
    detect_pattern, display_label, expand_for_view, month_grid, sync_on_completion, transition,
    Bounds, CalendarObserver, CalendarState, Clock, DayCell, FixedClock, Gesture, HoverPreview,
    Mode, Notification, Selection, SelectionEngine, SpanOverflow, SystemClock, TimeUnit,
    Transition, ViewType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}
