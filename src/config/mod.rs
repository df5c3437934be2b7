// src/config/mod.rs

//! Configuration loading and validation for monitdir.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the validated config (`model.rs`).
//! - Load a config file from disk and merge CLI flags (`loader.rs`).
//! - Reject inconsistent settings before monitoring starts (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, resolve_config};
pub use model::{ConfigFile, DEFAULT_INTERVAL_SECS, MonitorConfig, RawMonitorConfig};
