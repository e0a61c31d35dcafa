use chrono::{DateTime, Local};

/// `M/D/YYYY, h:mm:ss AM|PM`, e.g. `10/19/2026, 3:04:05 PM`
pub const DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Source of the current time. Note ids and dates are derived from it
pub trait Clock {
    /// Current local time
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Render a creation time the way it is shown next to a note
#[must_use]
pub fn format_date(at: &DateTime<Local>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Milliseconds since the Unix epoch, clamped to zero for pre-1970 clocks
#[must_use]
pub fn epoch_millis(at: &DateTime<Local>) -> u64 {
    u64::try_from(at.timestamp_millis()).unwrap_or(0)
}
