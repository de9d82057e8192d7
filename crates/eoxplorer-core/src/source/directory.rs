use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collection::DateRange;
use crate::error::{EoError, Result};
use crate::io::image_io::{load_band, BAND_EXTENSIONS};
use crate::raster::Raster;
use crate::scene::{Scene, SceneMetadata};

use super::ImagerySource;

/// Name of the per-scene metadata file.
pub const SCENE_MANIFEST: &str = "scene.toml";

/// Contents of `scene.toml`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneManifest {
    pub id: String,
    /// RFC 3339 timestamp, written as a quoted string.
    pub acquired: DateTime<Utc>,
    pub cloud_percentage: f32,
    /// Collection the scene belongs to. Scenes without one belong to the
    /// source's collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl SceneManifest {
    pub fn metadata(&self) -> SceneMetadata {
        SceneMetadata {
            id: self.id.clone(),
            acquired: self.acquired,
            cloud_percentage: self.cloud_percentage,
        }
    }
}

impl From<&SceneMetadata> for SceneManifest {
    fn from(m: &SceneMetadata) -> Self {
        Self {
            id: m.id.clone(),
            acquired: m.acquired,
            cloud_percentage: m.cloud_percentage,
            collection: None,
        }
    }
}

/// One collection stored on disk: a sub-directory per scene holding
/// `scene.toml` and one single-band image per band (`B4.tif`, `QA60.tif`…).
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
    collection_id: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, collection_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            collection_id: collection_id.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Metadata of every scene, without loading band data.
    pub fn manifests(&self) -> Result<Vec<(PathBuf, SceneManifest)>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            EoError::Imagery(format!("cannot list {}: {e}", self.root.display()))
        })?;

        let mut manifests = Vec::new();
        for entry in entries {
            let dir = entry?.path();
            let manifest_path = dir.join(SCENE_MANIFEST);
            if !dir.is_dir() || !manifest_path.is_file() {
                continue;
            }
            manifests.push((dir, read_manifest(&manifest_path)?));
        }
        manifests.sort_by(|a, b| a.1.acquired.cmp(&b.1.acquired));
        Ok(manifests)
    }

    /// Write `scene` below the root in the layout [`DirectorySource`] reads.
    ///
    /// Bands are stored as 16-bit digital numbers, so only raw scenes can be
    /// written: prepared scenes (reflectance, "no data") and samples that are
    /// not whole numbers in `0..=65535` are rejected before anything is
    /// written.
    pub fn write_scene(&self, scene: &Scene) -> Result<PathBuf> {
        check_raw_scene(scene)?;
        let dir = self.root.join(scene.id());
        fs::create_dir_all(&dir)?;
        let manifest = SceneManifest::from(scene.metadata());
        let text = toml::to_string_pretty(&manifest).map_err(|e| EoError::Config(e.to_string()))?;
        fs::write(dir.join(SCENE_MANIFEST), text)?;
        for (name, data) in scene.raster().bands() {
            crate::io::image_io::save_band(data, &dir.join(format!("{name}.tif")))?;
        }
        Ok(dir)
    }
}

impl ImagerySource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    fn query(&self, collection_id: &str, range: &DateRange) -> Result<Vec<Scene>> {
        if collection_id != self.collection_id {
            warn!(
                requested = collection_id,
                available = %self.collection_id,
                "Unknown collection"
            );
            return Ok(Vec::new());
        }

        self.manifests()?
            .into_iter()
            .filter(|(_, m)| m.collection.as_deref().is_none_or(|c| c == collection_id))
            .filter(|(_, m)| range.contains(m.acquired))
            .map(|(dir, m)| load_scene(&dir, m))
            .collect()
    }
}

fn check_raw_scene(scene: &Scene) -> Result<()> {
    if scene.is_prepared() {
        return Err(EoError::Imagery(format!(
            "scene {} is masked and scaled; only raw digital numbers can be written",
            scene.id()
        )));
    }
    for (name, data) in scene.raster().bands() {
        let bad = data
            .iter()
            .find(|v| !(v.is_finite() && v.fract() == 0.0 && (0.0..=65535.0).contains(*v)));
        if let Some(v) = bad {
            return Err(EoError::Imagery(format!(
                "scene {} band {name}: {v} is not a 16-bit digital number",
                scene.id()
            )));
        }
    }
    Ok(())
}

fn read_manifest(path: &Path) -> Result<SceneManifest> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|e| EoError::Imagery(format!("invalid manifest {}: {e}", path.display())))
}

fn load_scene(dir: &Path, manifest: SceneManifest) -> Result<Scene> {
    let mut band_files: Vec<(String, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| BAND_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .filter_map(|p| {
            let stem = p.file_stem()?.to_str()?.to_string();
            Some((stem, p))
        })
        .collect();
    band_files.sort();

    let mut raster = Raster::empty();
    for (band, path) in &band_files {
        raster.insert_band(band.clone(), load_band(path)?)?;
    }
    debug!(scene = %manifest.id, bands = raster.band_count(), "Loaded scene");

    Ok(Scene::new(manifest.metadata(), raster))
}
