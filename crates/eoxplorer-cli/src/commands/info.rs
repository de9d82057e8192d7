use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use eoxplorer_core::source::DirectorySource;

use super::load_config;

#[derive(Args)]
pub struct InfoArgs {
    /// Scene directory (one sub-directory per scene)
    pub dir: PathBuf,

    /// Explorer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let filter = config.collection_filter();
    let source = DirectorySource::new(&args.dir, &config.collection_id);
    let manifests = source
        .manifests()
        .with_context(|| format!("Failed to read scenes from {}", args.dir.display()))?;

    println!("Collection: {}", config.collection_id);
    println!("Range:      {}", config.date_range);
    println!("Threshold:  < {}% cloudy pixels", config.cloud_threshold);
    println!();

    let mut kept = 0;
    for (dir, manifest) in &manifests {
        let verdict = if filter.accepts(&manifest.metadata()) {
            kept += 1;
            "kept"
        } else if !config.date_range.contains(manifest.acquired) {
            "outside range"
        } else {
            "too cloudy"
        };
        println!(
            "  {:<32} {}  {:>6.2}%  {:<14} {}",
            manifest.id,
            manifest.acquired.format("%Y-%m-%d %H:%M"),
            manifest.cloud_percentage,
            verdict,
            dir.display()
        );
    }

    println!();
    println!("{} of {} scenes pass the filter", kept, manifests.len());
    Ok(())
}
