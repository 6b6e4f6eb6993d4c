//! Injectable wall clock and zoned timestamp formatting.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Format used for every generation timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Render the clock's current time in `zone`.
///
/// Unknown zone names fall back to UTC with a warning.
pub fn format_timestamp(clock: &dyn Clock, zone: &str) -> String {
    let now = clock.now_utc();

    match zone.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => {
            warn!(zone, "Unknown timezone, falling back to UTC");
            now.format(TIMESTAMP_FORMAT).to_string()
        }
    }
}
