//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod input;
pub mod normalize;
pub mod output;
pub mod tables;

use std::path::Path;

use tracing::debug;

use labelflow_core::LabelflowConfig;

/// Load the configuration: an explicit path, else the user config file if
/// one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LabelflowConfig> {
    if let Some(path) = config_path {
        return Ok(LabelflowConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(LabelflowConfig::from_file(&default_path)?)
    } else {
        Ok(LabelflowConfig::default())
    }
}
