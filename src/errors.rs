// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitdirError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot read directory {path:?}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to spawn command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MonitdirError {
    /// Shorthand used by the validation layer.
    pub fn config(msg: impl Into<String>) -> Self {
        MonitdirError::ConfigError(msg.into())
    }

    /// True if this error should cause the usage text to be shown.
    pub fn is_config_error(&self) -> bool {
        matches!(self, MonitdirError::ConfigError(_) | MonitdirError::TomlError(_))
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MonitdirError>;
