// src/engine/core.rs

//! Pure core state machine for the poll loop.
//!
//! `MonitorCore` consumes [`MonitorEvent`]s and produces a [`CoreStep`]:
//! an optional change set to dispatch plus the next wait. It owns the
//! single [`MonitorState`] record and performs no IO, so the whole
//! poll / diff / stabilize cycle can be unit tested with synthetic
//! snapshots.
//!
//! Two phases:
//! - `Idle`: baseline accepted, waiting for the next poll.
//! - `Stabilizing`: a poll differed from the baseline; sampling every second
//!   until the aggregate size stops changing, then dispatch and go idle.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::engine::stabilizer::{SAMPLE_INTERVAL, Stabilizer, Verdict};
use crate::engine::{CoreStep, MonitorEvent, NextStep};
use crate::snapshot::{diff, ChangeSet, Snapshot};

/// Loop state: the watched directory and its two most recent snapshots.
#[derive(Debug, Clone)]
pub struct MonitorState {
    directory: PathBuf,
    recursive: bool,
    previous: Snapshot,
    current: Snapshot,
}

impl MonitorState {
    pub fn new(directory: impl Into<PathBuf>, recursive: bool, baseline: Snapshot) -> Self {
        Self {
            directory: directory.into(),
            recursive,
            current: baseline.clone(),
            previous: baseline,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// The accepted baseline that polls are compared against.
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }

    /// The most recent poll snapshot.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    fn accept_current(&mut self) {
        self.previous = self.current.clone();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Idle,
    Stabilizing {
        changes: ChangeSet,
        stabilizer: Stabilizer,
    },
}

#[derive(Debug)]
pub struct MonitorCore {
    state: MonitorState,
    phase: Phase,
    interval: Duration,
    max_stabilize_samples: Option<u32>,
}

impl MonitorCore {
    pub fn new(state: MonitorState, interval: Duration, max_stabilize_samples: Option<u32>) -> Self {
        Self {
            state,
            phase: Phase::Idle,
            interval,
            max_stabilize_samples,
        }
    }

    /// Build a core for `config`, using `baseline` as the first accepted
    /// snapshot.
    pub fn from_config(config: &MonitorConfig, baseline: Snapshot) -> Self {
        Self::new(
            MonitorState::new(&config.directory, config.recursive, baseline),
            config.interval,
            config.max_stabilize_samples,
        )
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Handle a single event, updating state and returning what the shell
    /// should do next.
    pub fn step(&mut self, event: MonitorEvent) -> CoreStep {
        match event {
            MonitorEvent::Polled(snapshot) => self.handle_poll(snapshot),
            MonitorEvent::Sampled(snapshot) => self.handle_sample(snapshot),
            MonitorEvent::CaptureFailed => self.handle_capture_failure(),
            MonitorEvent::ShutdownRequested => CoreStep {
                dispatch: None,
                next: NextStep::Exit,
            },
        }
    }

    fn handle_poll(&mut self, snapshot: Snapshot) -> CoreStep {
        if !self.is_idle() {
            debug!("poll arrived while stabilizing; ignoring");
            return self.wait_for_sample();
        }

        self.state.current = snapshot;
        let changes = diff(&self.state.previous, &self.state.current);

        if changes.is_empty() {
            debug!(
                entries = self.state.current.len(),
                total_size = self.state.current.total_size(),
                "no changes"
            );
            self.state.accept_current();
            return self.wait_for_poll();
        }

        info!(
            added = changes.added.len(),
            removed = changes.removed.len(),
            "change detected; waiting for directory size to settle"
        );
        self.phase = Phase::Stabilizing {
            changes,
            stabilizer: Stabilizer::new(
                self.state.current.total_size(),
                self.max_stabilize_samples,
            ),
        };
        self.wait_for_sample()
    }

    fn handle_sample(&mut self, snapshot: Snapshot) -> CoreStep {
        let Phase::Stabilizing { stabilizer, .. } = &mut self.phase else {
            debug!("stabilization sample arrived while idle; ignoring");
            return self.wait_for_poll();
        };

        let verdict = stabilizer.observe(snapshot.total_size());
        debug!(
            total_size = snapshot.total_size(),
            samples = stabilizer.samples(),
            ?verdict,
            "stabilization sample"
        );

        match verdict {
            Verdict::Unsettled => self.wait_for_sample(),
            Verdict::Settled => self.finish_stabilizing(),
            Verdict::GaveUp => {
                warn!(
                    samples = stabilizer.samples(),
                    "directory size still changing at the sample limit; acting anyway"
                );
                self.finish_stabilizing()
            }
        }
    }

    fn handle_capture_failure(&mut self) -> CoreStep {
        if let Phase::Stabilizing { changes, .. } = &self.phase {
            // The baseline is untouched, so the next successful poll finds
            // these changes again.
            warn!(
                pending = changes.len(),
                "capture failed while stabilizing; dropping pending changes until next poll"
            );
            self.phase = Phase::Idle;
        }
        self.wait_for_poll()
    }

    fn finish_stabilizing(&mut self) -> CoreStep {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let changes = match phase {
            Phase::Stabilizing { changes, .. } => changes,
            Phase::Idle => ChangeSet::default(),
        };

        self.state.accept_current();

        CoreStep {
            dispatch: Some(changes),
            next: NextStep::Poll(self.interval),
        }
    }

    fn wait_for_poll(&self) -> CoreStep {
        CoreStep {
            dispatch: None,
            next: NextStep::Poll(self.interval),
        }
    }

    fn wait_for_sample(&self) -> CoreStep {
        CoreStep {
            dispatch: None,
            next: NextStep::Sample(SAMPLE_INTERVAL),
        }
    }
}
