// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure time-matching predicates for schedule policies.
//!
//! Decisions take the current minute of day and the dedup bookkeeping as
//! plain values, so every algorithm is testable against a simulated clock
//! without running a loop.

use cadence_core::{ClockTime, IntervalUnit, SchedulePolicy};
use std::time::Duration;

/// True when more than `window` has elapsed since the last dispatch.
///
/// A task that has never dispatched is always eligible.
pub fn dedup_elapsed(last_run_ms: Option<u64>, now_ms: u64, window: Duration) -> bool {
    match last_run_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > window.as_millis() as u64,
    }
}

/// True when `minute_of_day` equals one of the configured points.
pub fn time_point_matches(times: &[ClockTime], minute_of_day: u32) -> bool {
    times.iter().any(|t| t.minute_of_day() == minute_of_day)
}

/// True when `minute_of_day` falls inside `[start, end]` inclusive on an
/// interval multiple measured from `start`.
pub fn time_range_matches(
    start: ClockTime,
    end: ClockTime,
    interval: u64,
    unit: IntervalUnit,
    minute_of_day: u32,
) -> bool {
    let start_m = start.minute_of_day();
    let end_m = end.minute_of_day();
    if minute_of_day < start_m || minute_of_day > end_m {
        return false;
    }
    let interval_minutes = match unit {
        IntervalUnit::Minutes => interval,
        IntervalUnit::Hours => interval * 60,
        // Rejected by the policy constructor; unreachable for validated policies
        IntervalUnit::Seconds => 0,
    };
    if interval_minutes == 0 {
        return false;
    }
    u64::from(minute_of_day - start_m) % interval_minutes == 0
}

/// Poll-time decision for one policy.
///
/// `FixedInterval` never matches here: its loop is driven purely by
/// interval sleeps, not clock polls.
pub fn due(
    policy: &SchedulePolicy,
    minute_of_day: u32,
    last_run_ms: Option<u64>,
    now_ms: u64,
    dedup_window: Duration,
) -> bool {
    let matched = match policy {
        SchedulePolicy::TimePoints { times } => time_point_matches(times, minute_of_day),
        SchedulePolicy::TimeRange {
            start,
            end,
            interval,
            unit,
        } => time_range_matches(*start, *end, *interval, *unit, minute_of_day),
        SchedulePolicy::Once { time } => time.minute_of_day() == minute_of_day,
        SchedulePolicy::FixedInterval { .. } => false,
    };
    matched && dedup_elapsed(last_run_ms, now_ms, dedup_window)
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
