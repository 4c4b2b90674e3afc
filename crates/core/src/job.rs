// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job descriptors and structured run results.
//!
//! Every failure mode of a run is data on these records, never an error
//! crossing the scheduler boundary. Serde field names match the persisted
//! log format (`job`, `success`, `returncode`, `duration`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum length of captured diagnostic text, in characters.
pub const MAX_ERROR_LEN: usize = 200;

/// Truncate diagnostic text to [`MAX_ERROR_LEN`] characters.
pub fn truncate_error(text: &str) -> String {
    text.chars().take(MAX_ERROR_LEN).collect()
}

/// Descriptor for one executable unit.
///
/// The scheduler treats the target as opaque: it only knows how to invoke
/// the path and record the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub path: PathBuf,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Outcome of a single job within one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(rename = "job")]
    pub job_name: String,
    pub path: PathBuf,
    pub started: bool,
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(rename = "returncode", default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Wall-clock duration in seconds
    #[serde(rename = "duration")]
    pub duration_secs: f64,
    /// Diagnostic text, truncated to [`MAX_ERROR_LEN`] characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
}

impl JobResult {
    /// Result for a job whose path did not resolve. Never executed.
    pub fn missing(job: &JobSpec, now: DateTime<Utc>) -> Self {
        Self {
            job_name: job.name.clone(),
            path: job.path.clone(),
            started: false,
            succeeded: false,
            exit_code: None,
            start_time: now,
            end_time: now,
            duration_secs: 0.0,
            error: Some("job path does not exist".to_string()),
            skipped_reason: Some("missing".to_string()),
        }
    }
}

/// Aggregated outcome of one complete pass over a task's job list.
///
/// `total == success_count + failed_count == details.len()` holds by
/// construction via [`RunResult::from_details`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub task_name: String,
    pub run_time: DateTime<Utc>,
    pub total: usize,
    #[serde(rename = "success")]
    pub success_count: usize,
    #[serde(rename = "failed")]
    pub failed_count: usize,
    /// Per-job outcomes in the exact order the jobs were supplied
    pub details: Vec<JobResult>,
}

impl RunResult {
    /// Build a run result from per-job outcomes, computing the counts.
    pub fn from_details(
        task_name: impl Into<String>,
        run_time: DateTime<Utc>,
        details: Vec<JobResult>,
    ) -> Self {
        let success_count = details.iter().filter(|d| d.succeeded).count();
        Self {
            task_name: task_name.into(),
            run_time,
            total: details.len(),
            success_count,
            failed_count: details.len() - success_count,
            details,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
