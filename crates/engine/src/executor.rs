// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded execution of one job as a child process.

use cadence_core::{truncate_error, Clock, JobResult, JobSpec};
use std::process::Output;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

/// Hard per-job timeout.
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(3600);

/// Runs one executable unit to completion or timeout.
///
/// Every failure mode — missing path, launch failure, timeout, non-zero
/// exit — becomes a [`JobResult`]; execution never returns an error to
/// its caller. A zero exit code is the sole success criterion.
#[derive(Debug, Clone)]
pub struct JobExecutor {
    timeout: Duration,
}

impl Default for JobExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_JOB_TIMEOUT)
    }
}

impl JobExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run one job, capturing stdout/stderr as text.
    ///
    /// The child is killed when the timeout elapses (tokio kills it on
    /// drop of the pending `output()` future).
    pub async fn execute<C: Clock>(&self, job: &JobSpec, clock: &C) -> JobResult {
        if !job.path.exists() {
            debug!(job = %job.name, path = %job.path.display(), "job path missing, skipping");
            return JobResult::missing(job, clock.now_utc());
        }

        let start_time = clock.now_utc();
        let started_at = Instant::now();

        let mut cmd = Command::new(&job.path);
        cmd.kill_on_drop(true);
        let outcome = tokio::time::timeout(self.timeout, cmd.output()).await;

        let end_time = clock.now_utc();
        let duration_secs = started_at.elapsed().as_secs_f64();
        let base = JobResult {
            job_name: job.name.clone(),
            path: job.path.clone(),
            started: true,
            succeeded: false,
            exit_code: None,
            start_time,
            end_time,
            duration_secs,
            error: None,
            skipped_reason: None,
        };

        match outcome {
            Ok(Ok(output)) => finished(base, &output),
            Ok(Err(io_err)) => JobResult {
                started: false,
                error: Some(truncate_error(&io_err.to_string())),
                ..base
            },
            Err(_elapsed) => JobResult {
                error: Some("execution timed out".to_string()),
                ..base
            },
        }
    }
}

/// Fold a completed child's output into the result record.
///
/// On failure the error field carries stderr (stdout as fallback),
/// truncated to the record's character bound.
fn finished(base: JobResult, output: &Output) -> JobResult {
    let succeeded = output.status.code() == Some(0);
    let error = if succeeded {
        None
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostic = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout)
        } else {
            stderr
        };
        let text = diagnostic.trim();
        if text.is_empty() {
            Some(format!(
                "exited with code {}",
                output
                    .status
                    .code()
                    .map_or_else(|| "unknown".to_string(), |c| c.to_string())
            ))
        } else {
            Some(truncate_error(text))
        }
    };
    JobResult {
        succeeded,
        exit_code: output.status.code(),
        error,
        ..base
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
