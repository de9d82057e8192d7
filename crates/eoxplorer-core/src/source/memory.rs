use std::collections::HashMap;

use crate::collection::DateRange;
use crate::error::Result;
use crate::scene::Scene;

use super::ImagerySource;

/// Scenes held in memory, keyed by collection id.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    collections: HashMap<String, Vec<Scene>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, collection_id: impl Into<String>, scenes: Vec<Scene>) -> Self {
        self.insert(collection_id, scenes);
        self
    }

    pub fn insert(&mut self, collection_id: impl Into<String>, scenes: Vec<Scene>) {
        self.collections
            .entry(collection_id.into())
            .or_default()
            .extend(scenes);
    }
}

impl ImagerySource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn query(&self, collection_id: &str, range: &DateRange) -> Result<Vec<Scene>> {
        Ok(self
            .collections
            .get(collection_id)
            .map(|scenes| {
                scenes
                    .iter()
                    .filter(|s| range.contains(s.acquired()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
