use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_config;

#[derive(Args)]
pub struct PlacesArgs {
    /// Explorer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &PlacesArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    for place in &config.places {
        println!(
            "{:<28} lon {:>11.6}  lat {:>10.6}  zoom {}",
            place.label, place.center.lon, place.center.lat, place.zoom
        );
    }
    Ok(())
}
