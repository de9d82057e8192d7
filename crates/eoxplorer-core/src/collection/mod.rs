pub mod date_range;
pub mod filter;

pub use date_range::DateRange;
pub use filter::{prepare_scene, sort_by_cloud_cover, CollectionFilter};

use tracing::{info, warn};

use crate::error::Result;
use crate::scene::{Scene, SceneCollection};
use crate::source::ImagerySource;

/// Query an imagery source and turn the result into a filtered, ordered,
/// cloud-masked collection.
pub struct SceneCollectionPipeline<'a> {
    source: &'a dyn ImagerySource,
}

impl<'a> SceneCollectionPipeline<'a> {
    pub fn new(source: &'a dyn ImagerySource) -> Self {
        Self { source }
    }

    /// A failed query is returned to the caller, never swallowed.
    pub fn run(&self, collection_id: &str, filter: &CollectionFilter) -> Result<SceneCollection> {
        let scenes = self.query(collection_id, &filter.date_range)?;
        filter.build(scenes)
    }

    /// Raw scenes in `range`, before filtering and masking.
    pub fn query(&self, collection_id: &str, range: &DateRange) -> Result<Vec<Scene>> {
        let scenes = match self.source.query(collection_id, range) {
            Ok(scenes) => scenes,
            Err(e) => {
                warn!(collection = collection_id, error = %e, "Imagery query failed");
                return Err(e);
            }
        };
        info!(
            collection = collection_id,
            source = self.source.name(),
            queried = scenes.len(),
            "Queried imagery source"
        );
        Ok(scenes)
    }
}
