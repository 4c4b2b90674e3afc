// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential job runs and result aggregation.

use crate::executor::JobExecutor;
use async_trait::async_trait;
use cadence_core::{Clock, JobSpec, RunResult};
use cadence_storage::RunLogStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Seam between a scheduler loop and run execution.
///
/// The production implementation is [`RunReporter`]; tests substitute a
/// recording fake.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Run the supplied jobs in order and return the aggregated result.
    ///
    /// Never fails: per-job failures are data on the result.
    async fn dispatch(&self, task_name: &str, jobs: &[JobSpec]) -> RunResult;
}

/// Executes a job list strictly sequentially and persists the run.
///
/// Sequential execution is deliberate: job output ordering in the log is
/// deterministic, and jobs with shared external side effects do not race.
pub struct RunReporter<C: Clock> {
    executor: JobExecutor,
    store: RunLogStore,
    clock: Arc<C>,
}

impl<C: Clock> RunReporter<C> {
    pub fn new(executor: JobExecutor, store: RunLogStore, clock: Arc<C>) -> Self {
        Self {
            executor,
            store,
            clock,
        }
    }
}

#[async_trait]
impl<C: Clock + 'static> Dispatcher for RunReporter<C> {
    async fn dispatch(&self, task_name: &str, jobs: &[JobSpec]) -> RunResult {
        let run_time = self.clock.now_utc();
        let mut details = Vec::with_capacity(jobs.len());
        for job in jobs {
            details.push(self.executor.execute(job, self.clock.as_ref()).await);
        }
        let result = RunResult::from_details(task_name, run_time, details);

        info!(
            task = task_name,
            total = result.total,
            success = result.success_count,
            failed = result.failed_count,
            "run complete"
        );

        // Persistence failure must not abort a run; the result stands on
        // job outcomes alone.
        if let Err(e) = self.store.append(task_name, result.clone()) {
            warn!(task = task_name, error = %e, "failed to persist run log");
        }

        result
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
