//! Error types for swishctl

use std::path::PathBuf;

use swishmini_multitouch::MultitouchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Multitouch(#[from] MultitouchError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("No configuration directory on this system; pass --config")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Multitouch(e) if e.is_framework_unavailable() => 2,
            Self::Multitouch(MultitouchError::NoDevices) => 3,
            Self::InvalidConfiguration(_) | Self::YamlError(_) => 4,
            _ => 1,
        }
    }
}

/// Exit code for any error a command returned.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(e) = error.downcast_ref::<CliError>() {
        return e.exit_code();
    }
    match error.downcast_ref::<MultitouchError>() {
        Some(e) => CliError::Multitouch(e.clone()).exit_code(),
        None => 1,
    }
}
