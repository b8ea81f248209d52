//! Wall-clock access.
//!
//! Date logic (streaks, weekly stats, challenge progress) depends on "now".
//! The store takes a [`Clock`] so that logic can be exercised at fixed
//! points in time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Source of the current local time.
pub trait Clock {
    /// The current local date and time.
    fn now(&self) -> DateTime<Local>;

    /// Today's calendar date in local time.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    /// Freeze the clock at the given instant.
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// Freeze the clock at a local wall-clock time.
    ///
    /// Ambiguous or skipped local times (DST transitions) resolve to the
    /// earliest valid instant, falling back to interpreting the value as UTC.
    pub fn at(naive: NaiveDateTime) -> Self {
        Self::new(local_from_naive(naive))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.now
    }
}

/// Convert a local wall-clock time into a `DateTime<Local>`.
pub fn local_from_naive(naive: NaiveDateTime) -> DateTime<Local> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}
