// src/exec/dispatcher.rs

//! Turns a settled change set into output lines or command runs.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::backend::{CommandRunner, Invocation};
use crate::snapshot::ChangeSet;
use crate::types::Action;

/// Acts on change sets according to the configured [`Action`].
///
/// - `Print`: one `new file: <path>` line per added entry, then one
///   `file removed: <path>` line per removed entry.
/// - `Execute` without pass-filename: one run of the command, no arguments.
/// - `Execute` with pass-filename: one run per changed entry (added and
///   removed), with the entry's full path as the argument.
///
/// Paths are reported joined onto the watched directory. Failing to start a
/// command is logged and does not stop the monitor.
pub struct ActionDispatcher<R: CommandRunner> {
    directory: PathBuf,
    action: Action,
    runner: R,
    out: Box<dyn Write + Send>,
}

impl<R: CommandRunner> fmt::Debug for ActionDispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("directory", &self.directory)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> ActionDispatcher<R> {
    /// Dispatcher that prints report lines to stdout.
    pub fn new(directory: impl Into<PathBuf>, action: Action, runner: R) -> Self {
        Self::with_output(directory, action, runner, Box::new(std::io::stdout()))
    }

    /// Dispatcher that prints report lines to `out`.
    pub fn with_output(
        directory: impl Into<PathBuf>,
        action: Action,
        runner: R,
        out: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            directory: directory.into(),
            action,
            runner,
            out,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Act on one settled change set. Empty sets are ignored.
    pub async fn dispatch(&mut self, changes: &ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let Self {
            directory,
            action,
            runner,
            out,
        } = self;

        match action {
            Action::Print => {
                for path in &changes.added {
                    writeln!(out, "new file: {}", directory.join(path).display())?;
                }
                for path in &changes.removed {
                    writeln!(out, "file removed: {}", directory.join(path).display())?;
                }
                out.flush()?;
            }
            Action::Execute {
                command,
                pass_filename: false,
            } => {
                start(runner, Invocation::bare(command.as_str())).await;
            }
            Action::Execute {
                command,
                pass_filename: true,
            } => {
                info!(count = changes.len(), cmd = %command, "running command per changed file");
                for path in changes.changed() {
                    start(runner, Invocation::with_arg(command.as_str(), directory.join(path))).await;
                }
            }
        }

        Ok(())
    }
}

async fn start<R: CommandRunner>(runner: &mut R, invocation: Invocation) {
    let label = invocation.to_string();
    if let Err(e) = runner.run(invocation).await {
        warn!(cmd = %label, error = %e, "command could not be started");
    }
}
