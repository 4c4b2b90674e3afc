// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observational staleness monitoring.
//!
//! Each scheduler loop gets a companion monitor that periodically compares
//! now against the last dispatch time and warns when the gap exceeds the
//! configured threshold. It never mutates scheduler state and never
//! triggers a run.

use crate::scheduler::TaskState;
use cadence_core::{format_elapsed, Clock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Gap in seconds when the task is stale, `None` otherwise.
///
/// A task that has never dispatched is measured from the moment the
/// monitor started.
pub(crate) fn stale_gap_secs(
    last_run_ms: Option<u64>,
    started_ms: u64,
    now_ms: u64,
    threshold: Duration,
) -> Option<u64> {
    let baseline = last_run_ms.unwrap_or(started_ms);
    let gap_ms = now_ms.saturating_sub(baseline);
    (gap_ms > threshold.as_millis() as u64).then_some(gap_ms / 1000)
}

/// Companion loop for one scheduler loop.
pub(crate) struct StalenessMonitor<C: Clock> {
    task_name: String,
    state: Arc<TaskState>,
    clock: Arc<C>,
    check_interval: Duration,
    threshold: Duration,
    stop_rx: watch::Receiver<bool>,
}

impl<C: Clock> StalenessMonitor<C> {
    pub(crate) fn new(
        task_name: String,
        state: Arc<TaskState>,
        clock: Arc<C>,
        check_interval: Duration,
        threshold: Duration,
        stop_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            task_name,
            state,
            clock,
            check_interval,
            threshold,
            stop_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        let started_ms = self.clock.epoch_ms();
        loop {
            if *self.stop_rx.borrow() || !self.state.is_running() {
                break;
            }
            let stopped = tokio::select! {
                _ = tokio::time::sleep(self.check_interval) => false,
                _ = self.stop_rx.changed() => true,
            };
            if stopped || !self.state.is_running() {
                break;
            }

            match stale_gap_secs(
                self.state.last_run_ms(),
                started_ms,
                self.clock.epoch_ms(),
                self.threshold,
            ) {
                Some(gap_secs) => warn!(
                    task = %self.task_name,
                    gap = %format_elapsed(gap_secs),
                    "no recent dispatch, task may be stale"
                ),
                None => debug!(task = %self.task_name, "staleness check ok"),
            }
        }
        debug!(task = %self.task_name, "staleness monitor exited");
    }
}

#[cfg(test)]
#[path = "staleness_tests.rs"]
mod tests;
