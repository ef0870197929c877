//! Command implementations for swishctl

pub mod config;
pub mod device;
pub mod gesture;
pub mod monitor;

use std::time::Duration;

use clap::Args;
use swishmini_multitouch::MultitouchFramework;

use crate::config::SwishConfig;
use crate::error::CliError;

/// How long a blocking receive waits before re-checking for Ctrl-C.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shape of the simulated desktop `gestures` acts on.
#[derive(Args, Debug, Clone, Default)]
pub struct DryRunArgs {
    /// Start with the window in native full screen
    #[arg(long)]
    pub full_screen: bool,

    /// Pretend the window belongs to Google Chrome
    #[arg(long)]
    pub chrome: bool,
}

/// Open the framework named in the config, or the system one.
pub(crate) fn load_framework(config: &SwishConfig) -> Result<MultitouchFramework, CliError> {
    let framework = match &config.framework_path {
        Some(path) => MultitouchFramework::load_from(path)?,
        None => MultitouchFramework::load()?,
    };
    Ok(framework)
}
