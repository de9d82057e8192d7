use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use eoxplorer_core::explorer::{run_explorer_reported, ExplorerStage, ProgressReporter};
use eoxplorer_core::io::image_io::save_rendered;
use eoxplorer_core::source::DirectorySource;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::summary::print_explorer_summary;

use super::load_config;

#[derive(Args)]
pub struct RunArgs {
    /// Scene directory (one sub-directory per scene)
    pub dir: PathBuf,

    /// Explorer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Center all maps on a sample place before rendering
    #[arg(long)]
    pub place: Option<String>,

    /// Directory receiving one PNG per map
    #[arg(short, long, default_value = "maps")]
    pub output_dir: PathBuf,
}

struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: ExplorerStage, total_items: Option<usize>) {
        self.bar.set_message(stage.to_string());
        self.bar.set_length(total_items.unwrap_or(1) as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print_explorer_summary(&config, &args.dir);

    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { bar: bar.clone() });

    let source = DirectorySource::new(&args.dir, &config.collection_id);
    let explorer = run_explorer_reported(config, &source, reporter.clone())
        .context("Failed to build explorer")?;

    if let Some(ref place) = args.place {
        explorer.select_place(place)?;
    }

    let rendered = explorer.render_all_reported(reporter.as_ref())?;
    bar.finish_with_message("Done");

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;
    let nav = explorer.linker().navigation();
    println!();
    println!("View: {} @ zoom {}", nav.center, nav.zoom);
    for (id, title, image) in &rendered {
        let file_name = format!("{}_{}.png", id.0 + 1, slug(title));
        let path = args.output_dir.join(file_name);
        save_rendered(image, &path)?;
        debug!(viewport = %id, path = %path.display(), "Saved map");
        println!("  {:<22} {}", title, path.display());
    }
    Ok(())
}

fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}
