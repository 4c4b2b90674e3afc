// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: engine timing plus the task list.
//!
//! ```toml
//! [scheduler]
//! log_dir = "/var/lib/cadence/logs"
//!
//! [[task]]
//! name = "nightly-clean"
//! policy = { type = "time_points", times = ["02:30"] }
//! job = [
//!     { name = "sales", path = "/opt/jobs/clean_sales.sh" },
//!     { name = "inventory", path = "/opt/jobs/clean_inventory.sh" },
//! ]
//! ```

use cadence_core::{JobSpec, PolicyError, SchedulePolicy};
use cadence_engine::SchedulerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from daemon configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid policy for task '{task}': {source}")]
    InvalidPolicy {
        task: String,
        #[source]
        source: PolicyError,
    },
    #[error("duplicate task name '{0}'")]
    DuplicateTask(String),
}

/// One named task: a policy and an ordered job list.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDef {
    pub name: String,
    pub policy: SchedulePolicy,
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobSpec>,
}

/// Full `cadenced` configuration.
#[derive(Debug, Default, Deserialize)]
pub struct CadencedConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Trace log destination; stderr when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(rename = "task", default)]
    pub tasks: Vec<TaskDef>,
}

impl CadencedConfig {
    /// Load and validate a config file.
    ///
    /// Deserialization accepts any policy payload, so the invariants the
    /// constructors enforce are re-checked here.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.name.as_str()) {
                return Err(ConfigError::DuplicateTask(task.name.clone()));
            }
            task.policy
                .validate()
                .map_err(|source| ConfigError::InvalidPolicy {
                    task: task.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
