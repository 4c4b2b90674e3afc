// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine timing configuration.
//!
//! Defaults carry the production cadences: 30s clock polls, a 60s dedup
//! window paired with a 61s post-fire sleep, a 3600s per-job timeout, and
//! hourly staleness checks against an hourly threshold. Config files
//! spell durations as strings (`"30s"`, `"5m"`, `"1h"`) and override only
//! the fields they name.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration for {field}: {message}")]
    InvalidDuration { field: &'static str, message: String },
}

/// Parse a duration string like "500ms", "30s", "5m", "1h" into a Duration
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the numeric prefix
    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in duration: {}", s))?;

    let multiplier = match suffix.trim() {
        "ms" => return Ok(Duration::from_millis(num)),
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        other => return Err(format!("unknown duration suffix: {}", other)),
    };

    Ok(Duration::from_secs(num * multiplier))
}

/// Timing knobs for scheduler loops and run execution.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawSchedulerConfig")]
pub struct SchedulerConfig {
    /// Gap between clock polls for time-matching policies.
    pub poll_interval: Duration,
    /// Minimum elapsed time between two dispatches (duplicate suppression).
    pub dedup_window: Duration,
    /// Sleep after a dispatch before polling resumes; one second longer
    /// than the dedup window so a matched minute cannot fire twice.
    pub post_fire_sleep: Duration,
    /// Hard per-job timeout.
    pub job_timeout: Duration,
    /// Cadence of the staleness monitor check.
    pub staleness_check_interval: Duration,
    /// Gap since the last dispatch beyond which a task is reported stale.
    pub staleness_threshold: Duration,
    /// Directory holding per-task run logs.
    pub log_dir: PathBuf,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            dedup_window: Duration::from_secs(60),
            post_fire_sleep: Duration::from_secs(61),
            job_timeout: Duration::from_secs(3600),
            staleness_check_interval: Duration::from_secs(3600),
            staleness_threshold: Duration::from_secs(3600),
            log_dir: PathBuf::from("logs"),
        }
    }
}

/// String-duration form of [`SchedulerConfig`] as it appears in TOML.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSchedulerConfig {
    poll_interval: String,
    dedup_window: String,
    post_fire_sleep: String,
    job_timeout: String,
    staleness_check_interval: String,
    staleness_threshold: String,
    log_dir: PathBuf,
}

impl Default for RawSchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: "30s".to_string(),
            dedup_window: "60s".to_string(),
            post_fire_sleep: "61s".to_string(),
            job_timeout: "3600s".to_string(),
            staleness_check_interval: "1h".to_string(),
            staleness_threshold: "1h".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl TryFrom<RawSchedulerConfig> for SchedulerConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSchedulerConfig) -> Result<Self, Self::Error> {
        let field = |field: &'static str, value: &str| {
            parse_duration(value).map_err(|message| ConfigError::InvalidDuration { field, message })
        };
        Ok(Self {
            poll_interval: field("poll_interval", &raw.poll_interval)?,
            dedup_window: field("dedup_window", &raw.dedup_window)?,
            post_fire_sleep: field("post_fire_sleep", &raw.post_fire_sleep)?,
            job_timeout: field("job_timeout", &raw.job_timeout)?,
            staleness_check_interval: field(
                "staleness_check_interval",
                &raw.staleness_check_interval,
            )?,
            staleness_threshold: field("staleness_threshold", &raw.staleness_threshold)?,
            log_dir: raw.log_dir,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
