// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cadence_core::SchedulePolicy;

const MINUTE: u64 = 60_000;
const WINDOW: Duration = Duration::from_secs(60);

fn minute(hhmm: &str) -> u32 {
    let t: ClockTime = hhmm.parse().unwrap();
    t.minute_of_day()
}

#[yare::parameterized(
    before_window   = { "07:59", false },
    window_start    = { "08:00", true },
    off_interval    = { "08:15", false },
    first_interval  = { "08:30", true },
    mid_window      = { "09:00", true },
    third_interval  = { "09:30", true },
    window_end      = { "10:00", true },
    after_window    = { "10:01", false },
    far_outside     = { "23:59", false },
)]
fn time_range_half_hour_grid(at: &str, expected: bool) {
    let start: ClockTime = "08:00".parse().unwrap();
    let end: ClockTime = "10:00".parse().unwrap();
    assert_eq!(
        time_range_matches(start, end, 30, IntervalUnit::Minutes, minute(at)),
        expected
    );
}

#[yare::parameterized(
    start        = { "06:00", true },
    one_hour     = { "07:00", false },
    two_hours    = { "08:00", true },
    end          = { "12:00", true },
    past_end     = { "12:01", false },
)]
fn time_range_hour_unit(at: &str, expected: bool) {
    let start: ClockTime = "06:00".parse().unwrap();
    let end: ClockTime = "12:00".parse().unwrap();
    assert_eq!(
        time_range_matches(start, end, 2, IntervalUnit::Hours, minute(at)),
        expected
    );
}

#[test]
fn time_range_single_minute_window() {
    let start: ClockTime = "08:00".parse().unwrap();
    let end: ClockTime = "08:00".parse().unwrap();
    assert!(time_range_matches(start, end, 1, IntervalUnit::Minutes, minute("08:00")));
    assert!(!time_range_matches(start, end, 1, IntervalUnit::Minutes, minute("08:01")));
}

#[test]
fn time_range_seconds_unit_never_matches() {
    // Unvalidated payload (e.g. hand-edited config); must not fire
    let start: ClockTime = "08:00".parse().unwrap();
    let end: ClockTime = "10:00".parse().unwrap();
    assert!(!time_range_matches(start, end, 30, IntervalUnit::Seconds, minute("08:00")));
}

#[test]
fn time_points_match_any_listed_minute() {
    let times: Vec<ClockTime> = vec!["08:00".parse().unwrap(), "12:30".parse().unwrap()];
    assert!(time_point_matches(&times, minute("08:00")));
    assert!(time_point_matches(&times, minute("12:30")));
    assert!(!time_point_matches(&times, minute("08:01")));
    assert!(!time_point_matches(&times, minute("12:00")));
}

#[yare::parameterized(
    never_ran      = { None, 0, true },
    just_fired     = { Some(0), 0, false },
    within_window  = { Some(0), 59 * 1000, false },
    at_boundary    = { Some(0), 60 * 1000, false },
    past_window    = { Some(0), 61 * 1000, true },
)]
fn dedup_requires_strictly_more_than_window(
    last_run_ms: Option<u64>,
    now_ms: u64,
    expected: bool,
) {
    assert_eq!(dedup_elapsed(last_run_ms, now_ms, WINDOW), expected);
}

#[test]
fn due_suppresses_repeat_within_matched_minute() {
    let policy = SchedulePolicy::time_points(["08:00"]).unwrap();
    let at = minute("08:00");

    // First poll at 08:00 fires
    assert!(due(&policy, at, None, 10 * MINUTE, WINDOW));
    // Subsequent polls inside the same minute are suppressed
    assert!(!due(&policy, at, Some(10 * MINUTE), 10 * MINUTE + 30_000, WINDOW));
    assert!(!due(&policy, at, Some(10 * MINUTE), 10 * MINUTE + 59_000, WINDOW));
    // Next day's 08:00 (elapsed far beyond the window) fires again
    assert!(due(&policy, at, Some(10 * MINUTE), 10 * MINUTE + 86_400_000, WINDOW));
}

#[test]
fn due_once_matches_target_minute() {
    let policy = SchedulePolicy::once("23:00").unwrap();
    assert!(due(&policy, minute("23:00"), None, 0, WINDOW));
    assert!(!due(&policy, minute("22:59"), None, 0, WINDOW));
    assert!(!due(&policy, minute("23:01"), None, 0, WINDOW));
}

#[test]
fn due_fixed_interval_never_poll_matches() {
    let policy = SchedulePolicy::fixed_interval(2, IntervalUnit::Hours).unwrap();
    for m in [0, minute("08:00"), minute("23:59")] {
        assert!(!due(&policy, m, None, 0, WINDOW));
    }
}
