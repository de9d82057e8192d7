//! The EOxplorer app: four linked maps over one cloud-free Sentinel-2
//! composite, plus the static place and explanation catalogs.

pub mod catalog;
pub mod config;
mod orchestrator;
mod types;

pub use catalog::{default_explanations, default_places, Explanation, Place};
pub use config::{ExplorerConfig, IndexConfig, LayerConfig, LayerSource};
pub use orchestrator::{run_explorer, run_explorer_reported, Explorer};
pub use types::{ExplorerStage, ProgressReporter};
