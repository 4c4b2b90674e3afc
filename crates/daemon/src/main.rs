// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cadence Daemon (cadenced)
//!
//! Supervising process: builds one scheduler loop per configured task,
//! starts them all, and waits for SIGTERM/SIGINT before stopping them
//! gracefully. Runs in the foreground; a service manager owns its
//! lifecycle.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::PathBuf;

use cadence_daemon::{CadencedConfig, Supervisor};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

const DEFAULT_CONFIG: &str = "cadence.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("cadenced {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("cadenced {}", env!("CARGO_PKG_VERSION"));
                println!("Cadence Daemon - runs the configured recurring tasks");
                println!();
                println!("USAGE:");
                println!("    cadenced [CONFIG]");
                println!();
                println!("CONFIG defaults to ./{DEFAULT_CONFIG}. Tasks, schedule");
                println!("policies, and timing overrides are declared there.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("error: unexpected argument '{flag}'");
                eprintln!("Usage: cadenced [CONFIG | --help | --version]");
                std::process::exit(1);
            }
            path => config_path = PathBuf::from(path),
        }
    }

    let config = match CadencedConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {} ({})", e, config_path.display());
            std::process::exit(1);
        }
    };

    let _log_guard = setup_logging(&config)?;

    if config.tasks.is_empty() {
        error!(config = %config_path.display(), "no tasks configured, exiting");
        std::process::exit(1);
    }

    let supervisor = Supervisor::build(&config);
    supervisor.start_all()?;
    info!(
        config = %config_path.display(),
        tasks = supervisor.task_count(),
        "cadenced ready"
    );

    // Keep the process alive; background loops do the work
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    supervisor.stop_all();
    supervisor.join_all().await;
    info!("all tasks stopped");

    Ok(())
}

/// Set up tracing with an env filter, to a file when configured.
///
/// The guard must stay alive for the non-blocking writer to flush.
fn setup_logging(
    config: &CadencedConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.log_file {
        Some(log_path) => {
            let dir = log_path.parent().unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = log_path
                .file_name()
                .map(std::ffi::OsStr::to_os_string)
                .unwrap_or_else(|| "cadenced.log".into());
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(non_blocking))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            Ok(None)
        }
    }
}
