use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps for the timed loop.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real clock backed by `Instant::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock that advances by a fixed step on every reading.
///
/// The first reading returns the base instant, the n-th returns
/// `base + (n - 1) * step`.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    step: Duration,
    readings: Cell<u32>,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        Self {
            base: Instant::now(),
            step,
            readings: Cell::new(0),
        }
    }

    /// Number of times `now()` has been called.
    pub fn readings(&self) -> u32 {
        self.readings.get()
    }

    /// Time between the first reading and the latest one.
    pub fn elapsed(&self) -> Duration {
        self.step * self.readings.get().saturating_sub(1)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let n = self.readings.get();
        self.readings.set(n + 1);
        self.base + self.step * n
    }
}
