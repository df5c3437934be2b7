// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod snapshot;
pub mod types;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{resolve_config, MonitorConfig};
use crate::engine::{Runtime, TokioSleeper};
use crate::errors::Result;
use crate::exec::{ActionDispatcher, ShellCommandRunner};
use crate::fs::RealFileSystem;
use crate::types::Action;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (config file + CLI flags, validated)
/// - the baseline snapshot
/// - the action dispatcher and shell command runner
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;
    describe(&cfg);

    let runner = if cfg.wait_for_commands {
        ShellCommandRunner::waiting()
    } else {
        ShellCommandRunner::new()
    };
    let dispatcher = ActionDispatcher::new(&cfg.directory, cfg.action.clone(), runner);

    let runtime = Runtime::new(&cfg, Arc::new(RealFileSystem), dispatcher, TokioSleeper)?;

    // Ctrl-C → graceful shutdown.
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            // Keep the sender alive so the monitor is not stopped.
            std::future::pending::<()>().await;
        }
        let _ = shutdown_tx.send(());
    });

    runtime.with_shutdown(shutdown_rx).run().await
}

fn describe(cfg: &MonitorConfig) {
    let action = match cfg.action {
        Action::Print => "print".to_string(),
        Action::Execute {
            ref command,
            pass_filename,
        } => format!("execute {command:?} (pass filename: {pass_filename})"),
    };

    info!(
        dir = ?cfg.directory,
        recursive = cfg.recursive,
        interval_secs = cfg.interval.as_secs(),
        action = %action,
        "monitoring directory"
    );
    debug!(
        max_stabilize_samples = ?cfg.max_stabilize_samples,
        on_dir_error = ?cfg.on_dir_error,
        wait_for_commands = cfg.wait_for_commands,
        "monitor options"
    );
}
