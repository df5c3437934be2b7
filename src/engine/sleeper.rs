// src/engine/sleeper.rs

//! Pluggable sleep abstraction.
//!
//! The runtime waits through a `Sleeper` instead of calling
//! `tokio::time::sleep` directly, so tests can advance a scripted scenario
//! on every wait instead of spending real seconds.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub trait Sleeper: Send {
    /// Wait for `duration` (or whatever the implementation decides).
    fn sleep(&mut self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real sleeper used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&mut self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}
