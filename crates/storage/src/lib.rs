// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cadence-storage: durable run logs for the Cadence scheduler

pub mod run_log;

pub use run_log::{LogRecord, RunLogError, RunLogStore, MAX_RECORDS};
