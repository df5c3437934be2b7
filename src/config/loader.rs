// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, MonitorConfig, RawMonitorConfig};
use crate::errors::{MonitdirError, Result};

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; it does **not** validate the
/// values. Use [`resolve_config`] for that. A file that cannot be read is
/// reported as a configuration error naming the path.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        MonitdirError::config(format!("cannot read config file {path:?}: {e}"))
    })?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Produce the validated monitor configuration for a CLI invocation.
///
/// - Reads the `--config` file if one was given.
/// - Overlays the CLI flags on top.
/// - Validates the result (directory present and readable, action and
///   pass-filename consistent, positive interval).
pub fn resolve_config(args: &CliArgs) -> Result<MonitorConfig> {
    let base = match args.config {
        Some(ref path) => load_from_path(path)?.monitor,
        None => RawMonitorConfig::default(),
    };

    MonitorConfig::try_from(base.merge_cli(args))
}
