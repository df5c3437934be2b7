#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use monitdir::config::MonitorConfig;
use monitdir::types::{Action, DirErrorPolicy};

/// Builder for `MonitorConfig` to simplify test setup.
///
/// Skips filesystem validation so it works with `MockFileSystem` paths.
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            config: MonitorConfig::new_unchecked(directory.as_ref(), Action::Print),
        }
    }

    pub fn recursive(mut self, val: bool) -> Self {
        self.config.recursive = val;
        self
    }

    pub fn interval_secs(mut self, secs: u64) -> Self {
        self.config.interval = Duration::from_secs(secs);
        self
    }

    pub fn execute(mut self, command: &str, pass_filename: bool) -> Self {
        self.config.action = Action::Execute {
            command: command.to_string(),
            pass_filename,
        };
        self
    }

    pub fn max_stabilize_samples(mut self, max: u32) -> Self {
        self.config.max_stabilize_samples = Some(max);
        self
    }

    pub fn on_dir_error(mut self, policy: DirErrorPolicy) -> Self {
        self.config.on_dir_error = policy;
        self
    }

    pub fn build(self) -> MonitorConfig {
        self.config
    }
}

/// Cloneable in-memory writer for capturing report lines.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed clone suitable for `ActionDispatcher::with_output`.
    pub fn writer(&self) -> Box<dyn Write + Send> {
        Box::new(self.clone())
    }

    pub fn lines(&self) -> Vec<String> {
        let buf = self.buf.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
