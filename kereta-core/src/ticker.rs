//! Cooperative interval timers.
//!
//! The engine is advanced by explicit polling from a single logical thread;
//! nothing fires ambiently. A `Ticker` tracks when its next firing is due
//! and reports how many intervals elapsed since the last poll. Once
//! stopped, a ticker can never report a fire until it is started again;
//! this is the teardown contract the position sources and the trigger poll
//! both rely on.
use chrono::{DateTime, Duration, Utc};

/// Minimum interval; guards against zero/negative cadences looping forever.
const MIN_INTERVAL_MS: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Ticker {
    /// Create a stopped ticker with the given cadence. Intervals shorter
    /// than 100 ms are clamped.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let floor = Duration::milliseconds(MIN_INTERVAL_MS);
        Self {
            interval: interval.max(floor),
            next_due: None,
        }
    }

    /// Arm the ticker; the first fire is due one interval from `now`.
    /// Starting an already-running ticker is a no-op, so at most one
    /// schedule exists per instance.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Disarm the ticker. Idempotent; afterwards `poll` reports zero fires
    /// regardless of elapsed time.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of intervals that became due since the last poll. Stopped
    /// tickers always report zero.
    pub fn poll(&mut self, now: DateTime<Utc>) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut fires = 0u32;
        while due <= now {
            fires += 1;
            due += self.interval;
        }
        self.next_due = Some(due);
        fires
    }
}
