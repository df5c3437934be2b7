// src/exec/mod.rs

//! Action layer.
//!
//! - [`dispatcher`] decides, per change set, whether to print report lines
//!   or run the configured command (once, or once per changed file).
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `ShellCommandRunner`, which tests replace with a recording fake.

pub mod backend;
pub mod dispatcher;

pub use backend::{CommandRunner, Invocation, ShellCommandRunner};
pub use dispatcher::ActionDispatcher;
