//! Device discovery

use anyhow::Result;
use swishmini_multitouch::{MultitouchBackend, MultitouchError};

use crate::commands::load_framework;
use crate::config::SwishConfig;
use crate::error::CliError;
use crate::output;

/// Report the default device and the device list.
pub fn execute(config: &SwishConfig, json: bool) -> Result<()> {
    let framework = load_framework(config)?;
    let has_default = framework.create_default_device().is_some();
    let devices = framework.create_device_list().map_err(CliError::from)?;

    output::print_device_summary(framework.path(), has_default, devices.len(), json);

    if devices.is_empty() {
        return Err(CliError::from(MultitouchError::NoDevices).into());
    }
    Ok(())
}
