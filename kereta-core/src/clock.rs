//! Injected wall-clock source.
//!
//! Every temporal rule in the engine (journey windows, cooldowns, ticker
//! cadences) reads time through this trait, so tests and headless runs can
//! drive the whole core from a manually advanced clock.
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Source of the current wall-clock instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests and headless simulation runs.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump directly to an instant. Moving backwards is allowed; the engine
    /// treats time as whatever the injected clock reports.
    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    /// Advance the clock by a delta.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
