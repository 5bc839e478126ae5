//! Monotonic timestamp source for one partition

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Wall clock that never repeats or goes backwards.
///
/// Each call returns a timestamp at least one microsecond later than the
/// previous one, so ids derived from it are unique within a partition and
/// `created_at DESC` ordering is total.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_micros: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, truncated to microseconds
    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_micros();
        let previous = self
            .last_micros
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(wall.max(last + 1))
            })
            .unwrap_or(wall);
        let micros = wall.max(previous + 1);

        DateTime::from_timestamp_micros(micros).unwrap_or_else(Utc::now)
    }
}

/// Microsecond tick of a timestamp, used in generated ids
pub fn micros(at: DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}
