use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use eoxplorer_core::explorer::ExplorerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default config to a file instead of stdout
    #[arg(short, long, conflicts_with = "check")]
    pub output: Option<PathBuf>,

    /// Validate an existing config file instead of printing the default
    #[arg(long)]
    pub check: Option<PathBuf>,
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    if let Some(ref path) = args.check {
        let config = ExplorerConfig::load(path)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        println!(
            "{} is valid: {} map(s), {} place(s), range {}",
            path.display(),
            config.layers.len(),
            config.places.len(),
            config.date_range
        );
        return Ok(());
    }

    let toml_str = toml::to_string_pretty(&ExplorerConfig::default())
        .context("Failed to serialize default config")?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &toml_str)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Default config saved to {}", path.display());
        }
        None => print!("{toml_str}"),
    }
    Ok(())
}
