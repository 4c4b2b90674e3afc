// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cadence_core::{JobResult, JobSpec};
use chrono::TimeZone;
use std::io::Write;

fn run(task: &str, seq: i64) -> RunResult {
    let run_time = Utc.timestamp_opt(1_767_000_000 + seq, 0).unwrap();
    let job = JobSpec::new(format!("job-{seq}"), "/nonexistent/job.sh");
    RunResult::from_details(task, run_time, vec![JobResult::missing(&job, run_time)])
}

#[test]
fn append_creates_file_and_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());

    store.append("nightly", run("nightly", 0)).unwrap();

    let records = store.load("nightly");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].task_name, "nightly");
    assert_eq!(records[0].results.total, 1);
    assert!(store.log_path("nightly").exists());
}

#[test]
fn tasks_have_independent_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());

    store.append("sales", run("sales", 0)).unwrap();
    store.append("inventory", run("inventory", 0)).unwrap();

    assert_eq!(store.load("sales").len(), 1);
    assert_eq!(store.load("inventory").len(), 1);
    assert_ne!(store.log_path("sales"), store.log_path("inventory"));
}

#[test]
fn retention_keeps_newest_100_of_105() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());

    for seq in 0..105 {
        store.append("nightly", run("nightly", seq)).unwrap();
    }

    let records = store.load("nightly");
    assert_eq!(records.len(), MAX_RECORDS);
    // Oldest five evicted; insertion order preserved
    assert_eq!(records[0].results.details[0].job_name, "job-5");
    assert_eq!(records[99].results.details[0].job_name, "job-104");
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());
    assert!(store.load("never-ran").is_empty());
}

#[test]
fn corrupt_file_is_rotated_and_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());

    std::fs::create_dir_all(dir.path()).unwrap();
    let path = store.log_path("nightly");
    let mut f = File::create(&path).unwrap();
    f.write_all(b"{not json").unwrap();

    assert!(store.load("nightly").is_empty());
    assert!(path.with_extension("bak").exists());

    // Next append starts a fresh list
    store.append("nightly", run("nightly", 0)).unwrap();
    assert_eq!(store.load("nightly").len(), 1);
}

#[test]
fn append_after_corrupt_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());

    std::fs::write(store.log_path("nightly"), b"[[[").unwrap();
    store.append("nightly", run("nightly", 7)).unwrap();

    let records = store.load("nightly");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].results.details[0].job_name, "job-7");
}

#[test]
fn persisted_form_is_human_inspectable_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = RunLogStore::new(dir.path());
    store.append("nightly", run("nightly", 0)).unwrap();

    let text = std::fs::read_to_string(store.log_path("nightly")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["results"]["failed"], 1);
    assert_eq!(value[0]["results"]["details"][0]["skipped_reason"], "missing");
    // Pretty-printed for operators reading the file directly
    assert!(text.contains('\n'));
}
