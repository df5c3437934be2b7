use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use monitdir::errors::{MonitdirError, Result};
use monitdir::exec::{CommandRunner, Invocation};

/// A fake command runner that:
/// - records every invocation instead of spawning a process
/// - optionally fails to "start" commands whose text equals `fail_command`.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    fail_command: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a spawn failure for invocations of `command`.
    pub fn failing_on(command: &str) -> Self {
        Self {
            fail_command: Some(command.to_string()),
            ..Self::default()
        }
    }

    /// Snapshot of the invocations recorded so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Recorded invocations rendered as `"<command> <path>"` strings.
    pub fn rendered(&self) -> Vec<String> {
        self.invocations().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let log = Arc::clone(&self.invocations);
        let fail = self.fail_command.as_deref() == Some(invocation.command.as_str());

        Box::pin(async move {
            log.lock().unwrap().push(invocation.clone());
            if fail {
                return Err(MonitdirError::CommandSpawn {
                    command: invocation.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such command"),
                });
            }
            Ok(())
        })
    }
}
