pub mod composite;
pub mod config;
pub mod info;
pub mod places;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use eoxplorer_core::explorer::ExplorerConfig;

/// Load the config file if given, else the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ExplorerConfig> {
    match path {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ExplorerConfig::default()),
    }
}
