// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::types::{Action, DirErrorPolicy};

/// Default poll interval, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Top-level configuration file as read from TOML.
///
/// ```toml
/// [monitor]
/// directory = "~/Downloads"
/// recursive = true
/// interval = 10
/// action = "rsync -a ~/Downloads backup:"
/// pass_filename = false
/// ```
///
/// The section is optional; every key falls back to the CLI or a default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub monitor: RawMonitorConfig,
}

/// Unvalidated monitor settings, merged from the config file and the CLI.
///
/// Turn it into a [`MonitorConfig`] with `MonitorConfig::try_from` (or
/// [`MonitorConfig::validate_with`] to check against a non-default
/// filesystem).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawMonitorConfig {
    /// Directory to monitor. Required.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default)]
    pub recursive: bool,

    /// Seconds between polls. `None` means [`DEFAULT_INTERVAL_SECS`].
    #[serde(default)]
    pub interval: Option<u64>,

    /// `"print"` or a shell command. `None` means `"print"`.
    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub pass_filename: bool,

    /// Upper bound on stabilization samples; `None` waits forever.
    #[serde(default)]
    pub max_stabilize_samples: Option<u32>,

    #[serde(default)]
    pub on_dir_error: Option<DirErrorPolicy>,

    /// Await spawned commands instead of fire-and-forget.
    #[serde(default)]
    pub wait: bool,
}

impl RawMonitorConfig {
    /// Overlay CLI arguments on top of values loaded from a file.
    ///
    /// Options given on the command line win; boolean flags can only switch
    /// a setting on.
    pub fn merge_cli(mut self, args: &CliArgs) -> Self {
        if let Some(ref dir) = args.directory {
            self.directory = Some(dir.clone());
        }
        if let Some(interval) = args.interval {
            self.interval = Some(interval);
        }
        if let Some(ref cmd) = args.execute {
            self.action = Some(cmd.clone());
        }
        if let Some(max) = args.max_stabilize_samples {
            self.max_stabilize_samples = Some(max);
        }
        if let Some(policy) = args.on_dir_error {
            self.on_dir_error = Some(policy);
        }
        self.recursive |= args.recursive;
        self.pass_filename |= args.pass_filename;
        self.wait |= args.wait;
        self
    }
}

/// Validated configuration consumed by the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Absolute path of the watched directory.
    pub directory: PathBuf,
    pub recursive: bool,
    pub interval: Duration,
    pub action: Action,
    pub max_stabilize_samples: Option<u32>,
    pub on_dir_error: DirErrorPolicy,
    pub wait_for_commands: bool,
}

impl MonitorConfig {
    /// Build a config without any validation.
    ///
    /// Prefer `MonitorConfig::try_from(raw)`; this exists for callers that
    /// have already checked their inputs.
    pub fn new_unchecked(directory: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            directory: directory.into(),
            recursive: false,
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            action,
            max_stabilize_samples: None,
            on_dir_error: DirErrorPolicy::default(),
            wait_for_commands: false,
        }
    }
}
