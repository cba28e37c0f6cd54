//! Wall-clock source for event timestamps.
//!
//! Event instances carry the local time of generation formatted as
//! zero-padded `HH:MM:SS`. The clock is a trait so tests and replays can
//! pin the time instead of reading the system clock.

use chrono::{Local, NaiveTime};

/// Format used for event timestamps.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Source of the current wall-clock time of day.
pub trait WallClock: Send {
    /// Current local time of day.
    fn now(&self) -> NaiveTime;

    /// Current time formatted as an event timestamp.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// The system's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWallClock;

impl WallClock for LocalWallClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Format a time of day as `HH:MM:SS`. Sub-second precision is dropped.
pub fn format_timestamp(time: NaiveTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Whether `s` is a well-formed, zero-padded `HH:MM:SS` timestamp.
pub fn is_timestamp(s: &str) -> bool {
    s.len() == 8 && NaiveTime::parse_from_str(s, TIMESTAMP_FORMAT).is_ok()
}
