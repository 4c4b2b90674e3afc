// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only per-task run logs with bounded retention.
//!
//! One JSON file per task name under the store directory, holding the
//! newest [`MAX_RECORDS`] runs in insertion order. Appends rewrite the
//! full list through a temp file and an atomic rename, so a concurrent
//! reader never observes a torn list.

use cadence_core::RunResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Records retained per task; oldest are evicted first (FIFO).
pub const MAX_RECORDS: usize = 100;

/// Errors from run-log persistence
#[derive(Debug, Error)]
pub enum RunLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One persisted run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub task_name: String,
    pub run_time: DateTime<Utc>,
    pub results: RunResult,
}

/// Per-task run-log store rooted at one directory.
#[derive(Debug, Clone)]
pub struct RunLogStore {
    dir: PathBuf,
}

impl RunLogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log file for one task.
    pub fn log_path(&self, task_name: &str) -> PathBuf {
        self.dir.join(format!("{task_name}.json"))
    }

    /// Append one run, evicting the oldest records beyond [`MAX_RECORDS`].
    pub fn append(&self, task_name: &str, results: RunResult) -> Result<(), RunLogError> {
        let mut records = self.load(task_name);
        records.push(LogRecord {
            task_name: task_name.to_string(),
            run_time: results.run_time,
            results,
        });
        if records.len() > MAX_RECORDS {
            let excess = records.len() - MAX_RECORDS;
            records.drain(..excess);
        }
        self.write_atomic(&self.log_path(task_name), &records)
    }

    /// Load the records for one task.
    ///
    /// A missing file reads as empty. A corrupt file is moved to `.bak`
    /// and also reads as empty, so the next append starts fresh; the run
    /// path never sees an error from here.
    pub fn load(&self, task_name: &str) -> Vec<LogRecord> {
        let path = self.log_path(task_name);
        if !path.exists() {
            return Vec::new();
        }
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    task = task_name,
                    error = %e,
                    "failed to open run log, treating as empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(e) => {
                let bak = path.with_extension("bak");
                warn!(
                    task = task_name,
                    error = %e,
                    bak = %bak.display(),
                    "corrupt run log, moving aside and starting fresh"
                );
                let _ = fs::rename(&path, &bak);
                Vec::new()
            }
        }
    }

    /// Write the full record list atomically (temp file, sync, rename).
    fn write_atomic(&self, path: &Path, records: &[LogRecord]) -> Result<(), RunLogError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("tmp");

        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }

        fs::rename(&tmp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "run_log_tests.rs"]
mod tests;
