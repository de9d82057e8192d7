pub mod directory;
pub mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

use crate::collection::DateRange;
use crate::error::Result;
use crate::scene::Scene;

/// Catalog and retrieval backend for scenes.
///
/// Results are not cached between calls.
pub trait ImagerySource: Send + Sync {
    fn name(&self) -> &str;

    /// All scenes of `collection_id` acquired within `range`.
    fn query(&self, collection_id: &str, range: &DateRange) -> Result<Vec<Scene>>;
}
