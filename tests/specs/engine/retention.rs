//! Repeated dispatches through the reporter keep only the newest
//! hundred records per task.

use cadence_core::{Clock, FakeClock};
use cadence_engine::{Dispatcher, JobExecutor, RunReporter};
use cadence_storage::{RunLogStore, MAX_RECORDS};
use std::sync::Arc;

#[tokio::test]
async fn oldest_runs_are_evicted_beyond_the_cap() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());
    let clock = Arc::new(FakeClock::new());
    let reporter = RunReporter::new(JobExecutor::default(), store.clone(), Arc::clone(&clock));

    let runs = MAX_RECORDS + 5;
    let mut run_times = Vec::with_capacity(runs);
    for _ in 0..runs {
        run_times.push(clock.now_utc());
        reporter.dispatch("etl", &[]).await;
        clock.advance_secs(60);
    }

    let records = store.load("etl");
    assert_eq!(records.len(), MAX_RECORDS);
    // The five oldest runs are gone; order of the rest is preserved
    assert_eq!(records[0].run_time, run_times[5]);
    assert_eq!(records[MAX_RECORDS - 1].run_time, run_times[runs - 1]);
}
