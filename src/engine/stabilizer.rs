// src/engine/stabilizer.rs

//! Size-convergence check used before acting on a change set.
//!
//! After a change is detected the directory is re-sampled once per
//! [`SAMPLE_INTERVAL`]; each sample's aggregate size is compared with the
//! sample before it. Two equal consecutive sizes mean in-flight copies or
//! deletions have settled.

use std::time::Duration;

/// Delay between stabilization samples.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of observing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Size matched the previous sample.
    Settled,
    /// Size still moving; take another sample.
    Unsettled,
    /// Size still moving but the sample bound was reached.
    GaveUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stabilizer {
    last_size: u64,
    samples: u32,
    max_samples: Option<u32>,
}

impl Stabilizer {
    /// Start tracking from the size of the snapshot that revealed the change.
    ///
    /// `max_samples = None` keeps sampling for as long as the size moves.
    pub fn new(baseline_size: u64, max_samples: Option<u32>) -> Self {
        Self {
            last_size: baseline_size,
            samples: 0,
            max_samples,
        }
    }

    /// Feed the aggregate size of the next sample.
    pub fn observe(&mut self, size: u64) -> Verdict {
        self.samples += 1;

        if size == self.last_size {
            return Verdict::Settled;
        }
        self.last_size = size;

        match self.max_samples {
            Some(max) if self.samples >= max => Verdict::GaveUp,
            _ => Verdict::Unsettled,
        }
    }

    /// Number of samples observed so far.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn last_size(&self) -> u64 {
        self.last_size
    }
}
