// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cadence-core: data model for the Cadence recurring task scheduler

pub mod clock;
pub mod job;
pub mod policy;
pub mod time_fmt;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{truncate_error, JobResult, JobSpec, RunResult, MAX_ERROR_LEN};
pub use policy::{ClockTime, IntervalUnit, PolicyError, SchedulePolicy};
pub use time_fmt::format_elapsed;
