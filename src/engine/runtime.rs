// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::errors::{MonitdirError, Result};
use crate::exec::{ActionDispatcher, CommandRunner};
use crate::fs::FileSystem;
use crate::snapshot::capture;
use crate::types::DirErrorPolicy;

use super::core::MonitorCore;
use super::sleeper::Sleeper;
use super::{MonitorEvent, NextStep};

/// Which kind of capture the core asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    Poll,
    Sample,
}

/// Drives `MonitorCore`: captures snapshots, sleeps between them and hands
/// settled change sets to the `ActionDispatcher`.
///
/// Everything happens sequentially on one task; the only suspension points
/// are the sleeps, and each of them can be cut short by the shutdown signal.
pub struct Runtime<R: CommandRunner, S: Sleeper> {
    core: MonitorCore,
    fs: Arc<dyn FileSystem>,
    dispatcher: ActionDispatcher<R>,
    sleeper: S,
    on_dir_error: DirErrorPolicy,
    shutdown: Option<oneshot::Receiver<()>>,
}

impl<R: CommandRunner, S: Sleeper> fmt::Debug for Runtime<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("dispatcher", &self.dispatcher)
            .field("on_dir_error", &self.on_dir_error)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner, S: Sleeper> Runtime<R, S> {
    /// Take the initial baseline snapshot and build the runtime.
    ///
    /// An unreadable directory at this point is always an error, whatever
    /// the configured policy.
    pub fn new(
        config: &MonitorConfig,
        fs: Arc<dyn FileSystem>,
        dispatcher: ActionDispatcher<R>,
        sleeper: S,
    ) -> Result<Self> {
        let baseline = capture(fs.as_ref(), &config.directory, config.recursive)?;
        info!(
            dir = ?config.directory,
            recursive = config.recursive,
            entries = baseline.len(),
            "baseline snapshot taken"
        );

        Ok(Self {
            core: MonitorCore::from_config(config, baseline),
            fs,
            dispatcher,
            sleeper,
            on_dir_error: config.on_dir_error,
            shutdown: None,
        })
    }

    /// Stop the loop when `rx` fires (or its sender is dropped).
    pub fn with_shutdown(mut self, rx: oneshot::Receiver<()>) -> Self {
        self.shutdown = Some(rx);
        self
    }

    /// Main loop.
    ///
    /// Polls immediately, then keeps going until shutdown is requested or a
    /// fatal error occurs.
    pub async fn run(mut self) -> Result<()> {
        info!(
            dir = ?self.core.state().directory(),
            "monitdir started"
        );

        let mut next = NextStep::Poll(Duration::ZERO);

        loop {
            let event = match next {
                NextStep::Exit => break,
                NextStep::Poll(delay) => self.wait_then_capture(delay, CaptureKind::Poll).await?,
                NextStep::Sample(delay) => {
                    self.wait_then_capture(delay, CaptureKind::Sample).await?
                }
            };

            let step = self.core.step(event);

            if let Some(changes) = step.dispatch {
                info!(
                    added = changes.added.len(),
                    removed = changes.removed.len(),
                    "dispatching changes"
                );
                self.dispatcher.dispatch(&changes).await?;
            }

            next = step.next;
        }

        info!("monitdir stopped");
        Ok(())
    }

    async fn wait_then_capture(
        &mut self,
        delay: Duration,
        kind: CaptureKind,
    ) -> Result<MonitorEvent> {
        if !self.pause(delay).await {
            info!("shutdown requested");
            return Ok(MonitorEvent::ShutdownRequested);
        }

        let state = self.core.state();
        // Samples only compare immediate sizes, so they never walk the tree.
        let recursive = kind == CaptureKind::Poll && state.recursive();

        match capture(self.fs.as_ref(), state.directory(), recursive) {
            Ok(snapshot) => Ok(match kind {
                CaptureKind::Poll => MonitorEvent::Polled(snapshot),
                CaptureKind::Sample => MonitorEvent::Sampled(snapshot),
            }),
            Err(err @ MonitdirError::DirectoryAccess { .. })
                if self.on_dir_error == DirErrorPolicy::Skip =>
            {
                warn!(error = %err, ?kind, "directory unreadable; skipping this cycle");
                Ok(MonitorEvent::CaptureFailed)
            }
            Err(err) => Err(err),
        }
    }

    /// Sleep for `delay`. Returns `false` if shutdown was requested instead.
    async fn pause(&mut self, delay: Duration) -> bool {
        if delay.is_zero() {
            return true;
        }
        debug!(?delay, "sleeping");

        match self.shutdown.as_mut() {
            Some(rx) => tokio::select! {
                _ = self.sleeper.sleep(delay) => true,
                _ = rx => false,
            },
            None => {
                self.sleeper.sleep(delay).await;
                true
            }
        }
    }
}
