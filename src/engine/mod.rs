// src/engine/mod.rs

//! Poll loop for monitdir.
//!
//! The pure state machine lives in [`core`]: it consumes [`MonitorEvent`]s
//! (a poll or stabilization sample was captured, a capture failed, shutdown
//! was requested) and answers with a [`CoreStep`] saying what to dispatch and
//! how long to wait before the next capture. [`stabilizer`] holds the
//! size-convergence check used while a change set is pending.
//!
//! The async shell in [`runtime`] does the IO around it: capturing
//! snapshots, sleeping through a [`Sleeper`], and handing change sets to the
//! action dispatcher.

use std::time::Duration;

use crate::snapshot::{ChangeSet, Snapshot};

/// Events flowing into the core from the IO shell.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// A regular poll captured the directory.
    Polled(Snapshot),
    /// A one-second stabilization sample captured the directory.
    Sampled(Snapshot),
    /// The directory could not be read and the error policy says to carry on.
    CaptureFailed,
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// What the shell should do before feeding the core its next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Sleep, then take a regular poll.
    Poll(Duration),
    /// Sleep, then take a stabilization sample.
    Sample(Duration),
    /// Stop the loop.
    Exit,
}

/// Result of feeding one event to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// A settled change set to hand to the action dispatcher.
    pub dispatch: Option<ChangeSet>,
    pub next: NextStep,
}

pub mod core;
pub mod runtime;
pub mod sleeper;
pub mod stabilizer;

pub use self::core::{MonitorCore, MonitorState};
pub use runtime::Runtime;
pub use sleeper::{Sleeper, TokioSleeper};
pub use stabilizer::{SAMPLE_INTERVAL, Stabilizer, Verdict};
