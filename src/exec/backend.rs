// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The dispatcher talks to a `CommandRunner` instead of spawning processes
//! itself. Production code uses [`ShellCommandRunner`]; tests can provide a
//! runner that just records each [`Invocation`].

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{MonitdirError, Result};

/// One requested run of the configured command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The command string as configured.
    pub command: String,
    /// Changed file passed as a single argument (pass-filename mode).
    pub arg: Option<PathBuf>,
}

impl Invocation {
    pub fn bare(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            arg: None,
        }
    }

    pub fn with_arg(command: impl Into<String>, arg: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            arg: Some(arg.into()),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(ref arg) => write!(f, "{} {}", self.command, arg.display()),
            None => f.write_str(&self.command),
        }
    }
}

/// Trait abstracting how commands are started.
pub trait CommandRunner: Send {
    /// Start the given invocation.
    ///
    /// Returns once the process has been spawned (or, for runners that wait,
    /// once it has exited). The command's exit status is never an error.
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Runs invocations through the platform shell.
///
/// The command string goes to `sh -c` (or `cmd /C`), so pipes and
/// redirections work. In pass-filename mode the path is handed to the shell
/// as a positional parameter, never spliced into the command text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner {
    wait: bool,
}

impl ShellCommandRunner {
    /// Fire-and-forget: exit statuses are reaped and logged in the background.
    pub fn new() -> Self {
        Self { wait: false }
    }

    /// Wait for each command to exit before returning from `run`.
    pub fn waiting() -> Self {
        Self { wait: true }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let wait = self.wait;

        Box::pin(async move {
            let label = invocation.to_string();
            info!(cmd = %label, "running command");

            let mut child = build_command(&invocation)
                .spawn()
                .map_err(|source| MonitdirError::CommandSpawn {
                    command: label.clone(),
                    source,
                })?;

            if wait {
                log_exit(&label, child.wait().await);
            } else {
                tokio::spawn(async move {
                    log_exit(&label, child.wait().await);
                });
            }
            Ok(())
        })
    }
}

fn build_command(invocation: &Invocation) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&invocation.command);
        if let Some(ref arg) = invocation.arg {
            c.arg(arg);
        }
        c
    } else {
        let mut c = Command::new("sh");
        match invocation.arg {
            Some(ref arg) => {
                // `sh -c 'cmd "$1"' sh <path>`
                c.arg("-c")
                    .arg(format!("{} \"$1\"", invocation.command))
                    .arg("sh")
                    .arg(arg);
            }
            None => {
                c.arg("-c").arg(&invocation.command);
            }
        }
        c
    }
}

fn log_exit(label: &str, status: std::io::Result<std::process::ExitStatus>) {
    match status {
        Ok(status) => debug!(
            cmd = %label,
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            "command exited"
        ),
        Err(e) => warn!(cmd = %label, error = %e, "failed waiting for command"),
    }
}
