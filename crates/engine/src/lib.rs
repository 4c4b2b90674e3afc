// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cadence-engine: scheduler loops, job execution, and run reporting
//!
//! Each named task owns one [`SchedulerLoop`] and one staleness monitor,
//! both spawned as independent background tasks. A loop evaluates its
//! [`SchedulePolicy`](cadence_core::SchedulePolicy) on a poll cadence and
//! dispatches runs through the [`Dispatcher`] seam; the production
//! dispatcher is [`RunReporter`], which executes jobs sequentially and
//! persists the aggregated result.

pub mod config;
pub mod executor;
pub mod matching;
pub mod reporter;
pub mod scheduler;
pub mod staleness;

pub use config::{parse_duration, ConfigError, SchedulerConfig};
pub use executor::{JobExecutor, DEFAULT_JOB_TIMEOUT};
pub use reporter::{Dispatcher, RunReporter};
pub use scheduler::{SchedulerError, SchedulerLoop};
