//! swishctl configuration file

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swishmini_gesture::GestureThresholds;
use swishmini_multitouch::SessionConfig;
use tracing::debug;

use crate::error::CliError;

/// Largest accepted contact-frame channel.
const MAX_CHANNEL_CAPACITY: usize = 65_536;
/// Longest accepted restart debounce or settle time.
const MAX_RESTART_MS: u64 = 10_000;

/// Everything swishctl reads from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwishConfig {
    /// Framework binary to open instead of the system one.
    pub framework_path: Option<PathBuf>,
    /// Capacity of the contact-frame channel.
    pub channel_capacity: usize,
    /// Quiet period before a requested restart runs.
    pub restart_debounce_ms: u64,
    /// Pause between stopping and starting devices during a restart.
    pub restart_settle_ms: u64,
    /// Gesture recognition thresholds.
    pub gesture: GestureThresholds,
}

impl Default for SwishConfig {
    fn default() -> Self {
        Self {
            framework_path: None,
            channel_capacity: 256,
            restart_debounce_ms: 300,
            restart_settle_ms: 100,
            gesture: GestureThresholds::default(),
        }
    }
}

impl SwishConfig {
    /// `<config dir>/swishmini/config.yaml`, when the platform has a config
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swishmini").join("config.yaml"))
    }

    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate YAML. Absent keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        // An empty file parses as null rather than as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, CliError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_yaml()?)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.channel_capacity == 0 || self.channel_capacity > MAX_CHANNEL_CAPACITY {
            return Err(CliError::InvalidConfiguration(format!(
                "channel_capacity must be between 1 and {MAX_CHANNEL_CAPACITY}, got {}",
                self.channel_capacity
            )));
        }
        for (field, value) in [
            ("restart_debounce_ms", self.restart_debounce_ms),
            ("restart_settle_ms", self.restart_settle_ms),
        ] {
            if value > MAX_RESTART_MS {
                return Err(CliError::InvalidConfiguration(format!(
                    "{field} must be at most {MAX_RESTART_MS}, got {value}"
                )));
            }
        }
        self.gesture
            .validate()
            .map_err(|e| CliError::InvalidConfiguration(e.to_string()))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            channel_capacity: self.channel_capacity,
            restart_settle: Duration::from_millis(self.restart_settle_ms),
            ..SessionConfig::default()
        }
    }

    pub fn restart_debounce(&self) -> Duration {
        Duration::from_millis(self.restart_debounce_ms)
    }
}
