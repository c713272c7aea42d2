//! Time utilities: the clock abstraction and epoch-millis formatting.

use chrono::{Local, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Render epoch millis in local time with a strftime pattern.
pub fn format_millis(millis: i64, pattern: &str) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format(pattern).to_string(),
        None => "--".to_string(),
    }
}

pub fn millis_to_minutes(millis: i64) -> i64 {
    millis / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_on_demand() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(4_000);
        assert_eq!(clock.now_millis(), 5_000);
        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn minutes_are_truncated() {
        assert_eq!(millis_to_minutes(59_999), 0);
        assert_eq!(millis_to_minutes(7_260_000), 121);
    }
}
