// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cadence-daemon: supervising process for configured tasks
//!
//! Reads a TOML file describing named tasks, constructs one scheduler
//! loop per task, and keeps the process alive until a termination signal.
//! Scheduling itself lives in `cadence-engine`; this crate only wires it
//! to configuration and signals.

pub mod config;
pub mod supervisor;

pub use config::{CadencedConfig, ConfigError, TaskDef};
pub use supervisor::Supervisor;
