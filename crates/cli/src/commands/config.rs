//! Configuration file commands

use std::path::Path;

use anyhow::Result;

use crate::config::SwishConfig;
use crate::error::CliError;
use crate::output;

/// Print the effective configuration.
pub fn show(path: Option<&Path>, config: &SwishConfig, json: bool) -> Result<()> {
    output::print_config(path, config, json)
}

/// Write the default configuration to `path`.
pub fn init(path: Option<&Path>, force: bool, json: bool) -> Result<()> {
    let path = path.ok_or(CliError::NoConfigDir)?;
    if path.exists() && !force {
        return Err(CliError::ConfigExists(path.to_path_buf()).into());
    }
    SwishConfig::default().save_to_path(path)?;
    output::print_success(
        &format!("Wrote default configuration to {}", path.display()),
        json,
    );
    Ok(())
}
