// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_starts_at_midnight_epoch_zero() {
    let clock = FakeClock::new();
    assert_eq!(clock.epoch_ms(), 0);
    assert_eq!(clock.minute_of_day(), 0);
}

#[test]
fn fake_clock_set_local_time() {
    let clock = FakeClock::new();
    clock.set_local_time(8, 30);
    assert_eq!(clock.minute_of_day(), 8 * 60 + 30);
    // Epoch counter is untouched
    assert_eq!(clock.epoch_ms(), 0);
}

#[test]
fn fake_clock_advance_moves_both() {
    let clock = FakeClock::new();
    clock.set_local_time(7, 59);
    clock.advance_secs(61);
    assert_eq!(clock.epoch_ms(), 61_000);
    assert_eq!(clock.minute_of_day(), 8 * 60);
}

#[test]
fn fake_clock_wraps_across_midnight() {
    let clock = FakeClock::new();
    clock.set_local_time(23, 59);
    clock.advance_secs(120);
    assert_eq!(clock.minute_of_day(), 1);
}

#[test]
fn fake_clock_now_utc_tracks_epoch() {
    let clock = FakeClock::new();
    clock.advance_ms(1_500);
    assert_eq!(clock.now_utc().timestamp_millis(), 1_500);
}

#[test]
fn system_clock_is_consistent() {
    let clock = SystemClock;
    let before = clock.epoch_ms();
    let after = clock.epoch_ms();
    assert!(after >= before);
    assert!(clock.minute_of_day() < 24 * 60);
}
