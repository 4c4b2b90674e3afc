// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task scheduler loop.
//!
//! One [`SchedulerLoop`] per named task: `start` spawns the policy's
//! matching loop plus a staleness monitor and returns immediately; `stop`
//! cancels both through a watch channel. A run already in flight is never
//! cancelled — stop only prevents future dispatches.

use crate::config::SchedulerConfig;
use crate::matching;
use crate::reporter::Dispatcher;
use crate::staleness::StalenessMonitor;
use cadence_core::{Clock, IntervalUnit, JobSpec, SchedulePolicy};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Errors from scheduler lifecycle
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A loop instance runs once; construct a fresh one per task.
    #[error("scheduler for task '{0}' was already started")]
    AlreadyStarted(String),
}

/// State shared between a matching loop, its staleness monitor, and callers.
#[derive(Debug)]
pub(crate) struct TaskState {
    running: AtomicBool,
    last_run_ms: Mutex<Option<u64>>,
}

impl TaskState {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            last_run_ms: Mutex::new(None),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub(crate) fn last_run_ms(&self) -> Option<u64> {
        *self.last_run_ms.lock()
    }

    /// Recorded at dispatch time, before the run executes; this is the
    /// sole input to duplicate-fire suppression.
    fn record_dispatch(&self, now_ms: u64) {
        *self.last_run_ms.lock() = Some(now_ms);
    }
}

/// Background scheduling loop for one named task.
pub struct SchedulerLoop<D: Dispatcher + 'static, C: Clock + 'static> {
    task_name: String,
    jobs: Arc<Vec<JobSpec>>,
    dispatcher: Arc<D>,
    clock: Arc<C>,
    config: Arc<SchedulerConfig>,
    state: Arc<TaskState>,
    stop_tx: Arc<watch::Sender<bool>>,
    started: AtomicBool,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<D: Dispatcher + 'static, C: Clock + 'static> SchedulerLoop<D, C> {
    pub fn new(
        task_name: impl Into<String>,
        jobs: Vec<JobSpec>,
        dispatcher: Arc<D>,
        clock: Arc<C>,
        config: SchedulerConfig,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            task_name: task_name.into(),
            jobs: Arc::new(jobs),
            dispatcher,
            clock,
            config: Arc::new(config),
            state: Arc::new(TaskState::new()),
            stop_tx: Arc::new(stop_tx),
            started: AtomicBool::new(false),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Epoch ms of the most recent dispatch, if any.
    pub fn last_run_ms(&self) -> Option<u64> {
        self.state.last_run_ms()
    }

    /// Begin background execution under `policy`. Returns immediately.
    ///
    /// Fails if this instance was ever started before; a stopped loop is
    /// not restartable.
    pub fn start(&self, policy: SchedulePolicy) -> Result<(), SchedulerError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyStarted(self.task_name.clone()));
        }
        self.state.set_running(true);
        info!(
            task = %self.task_name,
            policy = policy.kind(),
            jobs = self.jobs.len(),
            "scheduler started"
        );

        let matching_loop = MatchLoop {
            task_name: self.task_name.clone(),
            jobs: Arc::clone(&self.jobs),
            dispatcher: Arc::clone(&self.dispatcher),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
            policy,
            stop_tx: Arc::clone(&self.stop_tx),
            stop_rx: self.stop_tx.subscribe(),
        };
        let monitor = StalenessMonitor::new(
            self.task_name.clone(),
            Arc::clone(&self.state),
            Arc::clone(&self.clock),
            self.config.staleness_check_interval,
            self.config.staleness_threshold,
            self.stop_tx.subscribe(),
        );

        let mut handles = self.handles.lock();
        handles.push(tokio::spawn(matching_loop.run()));
        handles.push(tokio::spawn(monitor.run()));
        Ok(())
    }

    /// Request graceful termination.
    ///
    /// Future dispatches stop; an in-flight run finishes on its own
    /// (bounded only by the per-job timeout).
    pub fn stop(&self) {
        self.state.set_running(false);
        let _ = self.stop_tx.send(true);
        info!(task = %self.task_name, "scheduler stopped");
    }

    /// Wait for the background tasks to finish.
    ///
    /// Completes after `stop()`, or on its own for a `Once` policy that
    /// has fired.
    pub async fn join(&self) {
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// The policy-specific matching loop, spawned by [`SchedulerLoop::start`].
struct MatchLoop<D: Dispatcher, C: Clock> {
    task_name: String,
    jobs: Arc<Vec<JobSpec>>,
    dispatcher: Arc<D>,
    clock: Arc<C>,
    config: Arc<SchedulerConfig>,
    state: Arc<TaskState>,
    policy: SchedulePolicy,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl<D: Dispatcher, C: Clock> MatchLoop<D, C> {
    async fn run(self) {
        let task_name = self.task_name.clone();
        match self.policy.clone() {
            SchedulePolicy::FixedInterval { interval, unit } => {
                self.run_fixed_interval(interval, unit).await;
            }
            policy => self.run_polled(policy).await,
        }
        debug!(task = %task_name, "matching loop exited");
    }

    /// Clock-polling loop for `TimePoints`, `TimeRange`, and `Once`.
    ///
    /// Polls the local clock, dispatches when the policy matches and the
    /// dedup window has elapsed, then sleeps the post-fire duration so a
    /// matched minute cannot fire again on the next poll.
    async fn run_polled(mut self, policy: SchedulePolicy) {
        loop {
            if !self.state.is_running() {
                break;
            }
            let due = matching::due(
                &policy,
                self.clock.minute_of_day(),
                self.state.last_run_ms(),
                self.clock.epoch_ms(),
                self.config.dedup_window,
            );
            if due {
                self.dispatch().await;
                if matches!(policy, SchedulePolicy::Once { .. }) {
                    // One-shot: the loop stops itself, monitor included
                    self.state.set_running(false);
                    let _ = self.stop_tx.send(true);
                    break;
                }
                if !self.sleep_or_stop(self.config.post_fire_sleep).await {
                    break;
                }
            } else if !self.sleep_or_stop(self.config.poll_interval).await {
                break;
            }
        }
    }

    /// Interval loop: dispatch immediately on entry, then every interval.
    async fn run_fixed_interval(mut self, interval: u64, unit: IntervalUnit) {
        let period = Duration::from_secs(unit.to_secs(interval));
        loop {
            if !self.state.is_running() {
                break;
            }
            self.dispatch().await;
            if !self.sleep_or_stop(period).await {
                break;
            }
        }
    }

    async fn dispatch(&self) {
        self.state.record_dispatch(self.clock.epoch_ms());
        let result = self.dispatcher.dispatch(&self.task_name, &self.jobs).await;
        debug!(
            task = %self.task_name,
            total = result.total,
            failed = result.failed_count,
            "dispatch complete"
        );
    }

    /// Sleep unless stopped first. Returns false when the loop should exit.
    ///
    /// Selecting against the stop channel bounds cancellation latency to
    /// effectively zero even mid-interval; no sleep here is unbounded.
    async fn sleep_or_stop(&mut self, duration: Duration) -> bool {
        if *self.stop_rx.borrow() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.stop_rx.changed() => false,
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
