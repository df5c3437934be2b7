// src/config/validate.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::model::{DEFAULT_INTERVAL_SECS, MonitorConfig, RawMonitorConfig};
use crate::errors::{MonitdirError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{Action, PRINT_ACTION};

impl TryFrom<RawMonitorConfig> for MonitorConfig {
    type Error = MonitdirError;

    fn try_from(raw: RawMonitorConfig) -> std::result::Result<Self, Self::Error> {
        MonitorConfig::validate_with(raw, &RealFileSystem)
    }
}

impl MonitorConfig {
    /// Validate `raw` against the given filesystem.
    ///
    /// Nothing here touches the directory beyond checking that it exists and
    /// can be listed; no snapshot is taken.
    pub fn validate_with(raw: RawMonitorConfig, fs: &dyn FileSystem) -> Result<Self> {
        let action = validate_action(&raw)?;
        let interval = validate_interval(raw.interval)?;
        validate_stabilize_bound(raw.max_stabilize_samples)?;
        let directory = validate_directory(raw.directory.as_deref(), fs)?;

        Ok(MonitorConfig {
            directory,
            recursive: raw.recursive,
            interval,
            action,
            max_stabilize_samples: raw.max_stabilize_samples,
            on_dir_error: raw.on_dir_error.unwrap_or_default(),
            wait_for_commands: raw.wait,
        })
    }
}

fn validate_action(raw: &RawMonitorConfig) -> Result<Action> {
    let action = raw.action.as_deref().unwrap_or(PRINT_ACTION);

    if action == PRINT_ACTION {
        if raw.pass_filename {
            return Err(MonitdirError::config(
                "pass-filename requires a command to execute (-e/--execute)",
            ));
        }
        return Ok(Action::Print);
    }

    if action.trim().is_empty() {
        return Err(MonitdirError::config("command to execute must not be empty"));
    }

    Ok(Action::Execute {
        command: action.to_string(),
        pass_filename: raw.pass_filename,
    })
}

fn validate_interval(interval: Option<u64>) -> Result<Duration> {
    match interval.unwrap_or(DEFAULT_INTERVAL_SECS) {
        0 => Err(MonitdirError::config(
            "interval must be a positive number of seconds (got 0)",
        )),
        secs => Ok(Duration::from_secs(secs)),
    }
}

fn validate_stabilize_bound(max: Option<u32>) -> Result<()> {
    if max == Some(0) {
        return Err(MonitdirError::config(
            "max_stabilize_samples must be >= 1 when set (got 0)",
        ));
    }
    Ok(())
}

fn validate_directory(dir: Option<&str>, fs: &dyn FileSystem) -> Result<PathBuf> {
    let dir = match dir {
        Some(d) if !d.trim().is_empty() => d,
        _ => return Err(MonitdirError::config("a directory to monitor is required (-d/--directory)")),
    };

    let path = expand_home(dir);
    if !fs.exists(&path) {
        return Err(MonitdirError::config(format!(
            "directory {:?} does not exist",
            path
        )));
    }
    if !fs.is_dir(&path) {
        return Err(MonitdirError::config(format!(
            "{:?} is not a directory",
            path
        )));
    }

    let absolute = fs
        .canonicalize(&path)
        .map_err(|e| MonitdirError::config(format!("cannot resolve {:?}: {e}", path)))?;

    fs.read_dir(&absolute)
        .map_err(|e| MonitdirError::config(format!("directory {:?} is not readable: {e}", absolute)))?;

    Ok(absolute)
}

/// Expand a leading `~` using `$HOME`, the way a shell would.
fn expand_home(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = std::env::var_os("HOME") {
                return Path::new(&home).join(rest.trim_start_matches('/'));
            }
        }
    }
    PathBuf::from(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::types::DirErrorPolicy;

    fn raw_for(dir: &str) -> RawMonitorConfig {
        RawMonitorConfig {
            directory: Some(dir.to_string()),
            ..Default::default()
        }
    }

    fn mock_with_dir() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_dir("/watched");
        fs
    }

    #[test]
    fn defaults_to_print_every_five_seconds() {
        let cfg = MonitorConfig::validate_with(raw_for("/watched"), &mock_with_dir()).unwrap();

        assert_eq!(cfg.directory, PathBuf::from("/watched"));
        assert_eq!(cfg.action, Action::Print);
        assert_eq!(cfg.interval, Duration::from_secs(5));
        assert_eq!(cfg.on_dir_error, DirErrorPolicy::Fatal);
        assert!(cfg.max_stabilize_samples.is_none());
    }

    #[test]
    fn pass_filename_without_command_is_rejected() {
        let raw = RawMonitorConfig {
            pass_filename: true,
            ..raw_for("/watched")
        };
        let err = MonitorConfig::validate_with(raw, &mock_with_dir()).unwrap_err();
        assert!(matches!(err, MonitdirError::ConfigError(ref m) if m.contains("pass-filename")));
    }

    #[test]
    fn pass_filename_with_explicit_print_is_rejected() {
        let raw = RawMonitorConfig {
            action: Some("print".to_string()),
            pass_filename: true,
            ..raw_for("/watched")
        };
        assert!(MonitorConfig::validate_with(raw, &mock_with_dir()).is_err());
    }

    #[test]
    fn command_with_pass_filename_is_accepted() {
        let raw = RawMonitorConfig {
            action: Some("notify".to_string()),
            pass_filename: true,
            ..raw_for("/watched")
        };
        let cfg = MonitorConfig::validate_with(raw, &mock_with_dir()).unwrap();
        assert_eq!(
            cfg.action,
            Action::Execute {
                command: "notify".to_string(),
                pass_filename: true
            }
        );
    }

    #[test]
    fn missing_directory_is_rejected() {
        let err = MonitorConfig::validate_with(RawMonitorConfig::default(), &mock_with_dir())
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn nonexistent_directory_is_rejected() {
        let err = MonitorConfig::validate_with(raw_for("/nope"), &mock_with_dir()).unwrap_err();
        assert!(matches!(err, MonitdirError::ConfigError(ref m) if m.contains("does not exist")));
    }

    #[test]
    fn file_instead_of_directory_is_rejected() {
        let fs = mock_with_dir();
        fs.add_file("/watched/a.txt", "x");
        let err = MonitorConfig::validate_with(raw_for("/watched/a.txt"), &fs).unwrap_err();
        assert!(matches!(err, MonitdirError::ConfigError(ref m) if m.contains("not a directory")));
    }

    #[test]
    fn zero_interval_and_zero_bound_are_rejected() {
        let raw = RawMonitorConfig {
            interval: Some(0),
            ..raw_for("/watched")
        };
        assert!(MonitorConfig::validate_with(raw, &mock_with_dir()).is_err());

        let raw = RawMonitorConfig {
            max_stabilize_samples: Some(0),
            ..raw_for("/watched")
        };
        assert!(MonitorConfig::validate_with(raw, &mock_with_dir()).is_err());
    }

    #[test]
    fn blank_command_is_rejected() {
        let raw = RawMonitorConfig {
            action: Some("   ".to_string()),
            ..raw_for("/watched")
        };
        assert!(MonitorConfig::validate_with(raw, &mock_with_dir()).is_err());
    }
}
