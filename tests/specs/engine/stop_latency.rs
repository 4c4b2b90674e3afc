//! Stopping a loop mid-interval must not wait out the interval.
//!
//! Runs in real time on purpose: the bound being proven is wall-clock
//! responsiveness of a loop parked in a long sleep.

use cadence_core::{IntervalUnit, SchedulePolicy, SystemClock};
use cadence_engine::{JobExecutor, RunReporter, SchedulerConfig, SchedulerLoop};
use cadence_storage::RunLogStore;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn stop_interrupts_an_hour_long_sleep() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(SystemClock);
    let reporter = Arc::new(RunReporter::new(
        JobExecutor::default(),
        RunLogStore::new(dir.path()),
        Arc::clone(&clock),
    ));
    let looper = SchedulerLoop::new(
        "hourly",
        Vec::new(),
        reporter,
        clock,
        SchedulerConfig::default(),
    );

    looper
        .start(SchedulePolicy::fixed_interval(1, IntervalUnit::Hours).unwrap())
        .unwrap();

    // Let the immediate first dispatch happen, then stop mid-sleep
    tokio::time::sleep(Duration::from_millis(100)).await;
    looper.stop();

    tokio::time::timeout(Duration::from_secs(2), looper.join())
        .await
        .expect("loop did not stop within two seconds");
    assert!(!looper.is_running());
}
