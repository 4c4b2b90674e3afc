//! A mixed run (success, failure, missing path) flows through the
//! reporter into the persisted log with the expected field names.

use crate::prelude::{read_log_json, write_script};
use cadence_core::{JobSpec, SystemClock};
use cadence_engine::{Dispatcher, JobExecutor, RunReporter};
use cadence_storage::RunLogStore;
use std::sync::Arc;

#[tokio::test]
async fn mixed_run_is_reported_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let jobs_dir = dir.path().join("jobs");
    std::fs::create_dir_all(&jobs_dir).unwrap();
    let ok = write_script(&jobs_dir, "ok.sh", "echo done");
    let fail = write_script(&jobs_dir, "fail.sh", "echo boom >&2\nexit 3");

    let log_dir = dir.path().join("logs");
    let reporter = RunReporter::new(
        JobExecutor::default(),
        RunLogStore::new(&log_dir),
        Arc::new(SystemClock),
    );

    let jobs = vec![
        JobSpec::new("ok", ok),
        JobSpec::new("fail", fail),
        JobSpec::new("ghost", jobs_dir.join("missing.sh")),
    ];
    let result = reporter.dispatch("etl", &jobs).await;

    assert_eq!(result.total, 3);
    assert_eq!(result.success_count, 1);
    assert_eq!(result.failed_count, 2);
    assert_eq!(result.details[1].error.as_deref(), Some("boom"));
    assert_eq!(result.details[2].skipped_reason.as_deref(), Some("missing"));

    let records = read_log_json(&log_dir, "etl");
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let run = &records[0]["results"];
    assert_eq!(run["task_name"], "etl");
    assert_eq!(run["total"], 3);
    assert_eq!(run["success"], 1);
    assert_eq!(run["failed"], 2);

    let details = run["details"].as_array().unwrap();
    assert_eq!(details[0]["job"], "ok");
    assert_eq!(details[0]["success"], true);
    assert_eq!(details[0]["returncode"], 0);
    assert_eq!(details[1]["job"], "fail");
    assert_eq!(details[1]["returncode"], 3);
    assert_eq!(details[1]["error"], "boom");
    assert_eq!(details[2]["job"], "ghost");
    assert_eq!(details[2]["success"], false);
    assert_eq!(details[2]["started"], false);
    assert_eq!(details[2]["skipped_reason"], "missing");
    // Never launched, so no exit code is recorded at all
    assert!(details[2].get("returncode").is_none());
}
