// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wall-clock abstraction.
//!
//! Time matching reads the local clock at minute resolution; run records
//! carry UTC timestamps. Both go through [`Clock`] so the matching
//! algorithms can be driven by a simulated clock in tests.

use chrono::{DateTime, Local, NaiveTime, Timelike, Utc};
use parking_lot::Mutex;

/// Source of current time for scheduling decisions and run records.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;

    /// Current local wall-clock time of day.
    fn local_time(&self) -> NaiveTime;

    /// Current UTC timestamp for run records.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Minutes since local midnight (minute resolution).
    fn minute_of_day(&self) -> u32 {
        let t = self.local_time();
        t.hour() * 60 + t.minute()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }

    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually set and advanced clock for tests.
///
/// Starts at local midnight, epoch 0. The local time of day and the epoch
/// counter advance together; the time of day wraps across midnight.
#[derive(Debug, Default)]
pub struct FakeClock {
    inner: Mutex<FakeInner>,
}

#[derive(Debug, Default)]
struct FakeInner {
    epoch_ms: u64,
    time: NaiveTime,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local time of day without touching the epoch counter.
    pub fn set_local_time(&self, hour: u32, minute: u32) {
        let mut inner = self.inner.lock();
        inner.time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    }

    /// Advance both the epoch counter and the local time of day.
    pub fn advance_ms(&self, ms: u64) {
        let mut inner = self.inner.lock();
        inner.epoch_ms += ms;
        let (time, _wrapped) = inner
            .time
            .overflowing_add_signed(chrono::Duration::milliseconds(ms as i64));
        inner.time = time;
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }

    fn local_time(&self) -> NaiveTime {
        self.inner.lock().time
    }

    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.epoch_ms() as i64).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
