mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eoxplorer", about = "Cloud-free Sentinel-2 composites and linked map views")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scenes in a scene directory and how the filter treats them
    Info(commands::info::InfoArgs),
    /// Composite a scene directory and render it through one profile
    Composite(commands::composite::CompositeArgs),
    /// Build all linked maps and render each to a PNG
    Run(commands::run::RunArgs),
    /// Print, save or validate an explorer config
    Config(commands::config::ConfigArgs),
    /// List the sample locations
    Places(commands::places::PlacesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Composite(args) => commands::composite::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Places(args) => commands::places::run(args),
    }
}
