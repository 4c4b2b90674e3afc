// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owns the scheduler loops for every configured task.
//!
//! Loops are independent owned instances held here and passed nowhere
//! else; there is no global registry.

use crate::config::CadencedConfig;
use cadence_core::{SchedulePolicy, SystemClock};
use cadence_engine::{JobExecutor, RunReporter, SchedulerError, SchedulerLoop};
use cadence_storage::RunLogStore;
use std::sync::Arc;
use tracing::info;

/// Scheduler loop with production wiring.
pub type TaskLoop = SchedulerLoop<RunReporter<SystemClock>, SystemClock>;

struct TaskEntry {
    looper: TaskLoop,
    policy: SchedulePolicy,
}

/// Builds, starts, and stops one scheduler loop per configured task.
pub struct Supervisor {
    tasks: Vec<TaskEntry>,
}

impl Supervisor {
    /// Build one scheduler loop per configured task. Nothing starts yet.
    pub fn build(config: &CadencedConfig) -> Self {
        let clock = Arc::new(SystemClock);
        let store = RunLogStore::new(&config.scheduler.log_dir);
        let tasks = config
            .tasks
            .iter()
            .map(|task| {
                let reporter = Arc::new(RunReporter::new(
                    JobExecutor::new(config.scheduler.job_timeout),
                    store.clone(),
                    Arc::clone(&clock),
                ));
                TaskEntry {
                    looper: SchedulerLoop::new(
                        task.name.clone(),
                        task.jobs.clone(),
                        reporter,
                        Arc::clone(&clock),
                        config.scheduler.clone(),
                    ),
                    policy: task.policy.clone(),
                }
            })
            .collect();
        Self { tasks }
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Start every task loop. Returns immediately.
    pub fn start_all(&self) -> Result<(), SchedulerError> {
        for task in &self.tasks {
            task.looper.start(task.policy.clone())?;
        }
        info!(tasks = self.tasks.len(), "all tasks started");
        Ok(())
    }

    /// Request graceful termination of every loop.
    pub fn stop_all(&self) {
        for task in &self.tasks {
            if task.looper.is_running() {
                task.looper.stop();
            }
        }
    }

    /// Wait for every loop's background tasks to finish.
    pub async fn join_all(&self) {
        for task in &self.tasks {
            task.looper.join().await;
        }
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
