use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use eoxplorer_core::collection::{DateRange, SceneCollectionPipeline};
use eoxplorer_core::composite::{CompositeMethod, TemporalCompositor};
use eoxplorer_core::io::image_io::save_rendered;
use eoxplorer_core::render::{Layer, VisualizationProfile};
use eoxplorer_core::source::DirectorySource;

use super::load_config;

#[derive(Clone, Copy, ValueEnum)]
pub enum CompositeMethodArg {
    Median,
    Mosaic,
}

impl From<CompositeMethodArg> for CompositeMethod {
    fn from(m: CompositeMethodArg) -> Self {
        match m {
            CompositeMethodArg::Median => CompositeMethod::Median,
            CompositeMethodArg::Mosaic => CompositeMethod::Mosaic,
        }
    }
}

#[derive(Args)]
pub struct CompositeArgs {
    /// Scene directory (one sub-directory per scene)
    pub dir: PathBuf,

    /// Explorer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Compositing method
    #[arg(long, value_enum, default_value = "median")]
    pub method: CompositeMethodArg,

    /// Profile name from the config (e.g. "True Color", "NDVI")
    #[arg(long, default_value = "True Color")]
    pub profile: String,

    /// Override the start of the date range (YYYY-MM-DD or RFC 3339)
    #[arg(long, requires = "end")]
    pub start: Option<String>,

    /// Override the end of the date range, excluded
    #[arg(long, requires = "start")]
    pub end: Option<String>,

    /// Override the cloud-cover threshold (percent)
    #[arg(long)]
    pub cloud_threshold: Option<f32>,

    /// Output PNG path
    #[arg(short, long, default_value = "composite.png")]
    pub output: PathBuf,
}

pub fn run(args: &CompositeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let (Some(start), Some(end)) = (&args.start, &args.end) {
        config.date_range = DateRange::parse(start, end)?;
    }
    if let Some(threshold) = args.cloud_threshold {
        config.cloud_threshold = threshold;
    }

    let Some(layer_config) = config.layers.iter().find(|l| l.profile.name() == args.profile) else {
        let names: Vec<_> = config.layers.iter().map(|l| l.profile.name()).collect();
        bail!("Unknown profile '{}', expected one of {:?}", args.profile, names);
    };
    let profile: Arc<VisualizationProfile> = Arc::new(layer_config.profile.clone());

    let source = DirectorySource::new(&args.dir, &config.collection_id);
    let collection = SceneCollectionPipeline::new(&source)
        .run(&config.collection_id, &config.collection_filter())
        .with_context(|| format!("Failed to build collection from {}", args.dir.display()))?;
    println!(
        "{} scene(s) in {} below {}% cloud cover",
        collection.len(),
        config.date_range,
        config.cloud_threshold
    );

    let method = CompositeMethod::from(args.method);
    let compositor = TemporalCompositor::excluding([config.mask.qa_band.clone()]);
    println!("Compositing ({})...", method);
    let composite = compositor.composite(&collection, method)?;

    let raster = config.index.raster_for_profile(composite, &profile)?;
    let layer = Layer::bind(Arc::new(raster), profile)?;
    let image = layer.render()?;
    save_rendered(&image, &args.output)?;
    println!("Saved to {}", args.output.display());
    Ok(())
}
