//! Clock abstraction
//!
//! The engine never reads ambient system time. Hosts hand it a [`Clock`]
//! and tests pin "today" with [`FixedClock`].

use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Source of the current calendar day
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Calendar day of a timestamp in its own time zone.
///
/// The engine compares calendar days only. Hosts holding timestamps (a
/// check-in time, a browser `Date`) must map them through this, using the
/// user's local zone, before passing them in.
pub fn calendar_day<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}
