use chrono::{DateTime, Utc};
use ndarray::Array2;

use crate::error::{EoError, Result};
use crate::raster::Raster;

/// Catalog metadata of one acquisition.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneMetadata {
    pub id: String,
    pub acquired: DateTime<Utc>,
    /// Cloudy-pixel percentage reported by the provider (0..100).
    pub cloud_percentage: f32,
}

/// One multispectral acquisition.
#[derive(Clone, Debug)]
pub struct Scene {
    metadata: SceneMetadata,
    raster: Raster,
    /// Set once cloud masking and reflectance scaling have been applied.
    prepared: bool,
}

impl Scene {
    pub fn new(metadata: SceneMetadata, raster: Raster) -> Self {
        Self {
            metadata,
            raster,
            prepared: false,
        }
    }

    pub fn from_bands<I, S>(metadata: SceneMetadata, bands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Array2<f32>)>,
        S: Into<String>,
    {
        Ok(Self::new(metadata, Raster::from_bands(bands)?))
    }

    pub(crate) fn prepared(metadata: SceneMetadata, raster: Raster) -> Self {
        Self {
            metadata,
            raster,
            prepared: true,
        }
    }

    pub fn metadata(&self) -> &SceneMetadata {
        &self.metadata
    }

    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn acquired(&self) -> DateTime<Utc> {
        self.metadata.acquired
    }

    pub fn cloud_percentage(&self) -> f32 {
        self.metadata.cloud_percentage
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn band(&self, name: &str) -> Option<&Array2<f32>> {
        self.raster.band(name)
    }

    pub fn require_band(&self, name: &str) -> Result<&Array2<f32>> {
        self.raster.require_band(name)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.raster.shape()
    }

    /// Whether the scene went through masking and scaling already.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn into_parts(self) -> (SceneMetadata, Raster) {
        (self.metadata, self.raster)
    }
}

/// An ordered sequence of scenes. Order matters to mosaic composition.
#[derive(Clone, Debug, Default)]
pub struct SceneCollection {
    scenes: Vec<Scene>,
}

impl SceneCollection {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scene> {
        self.scenes.iter()
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn ids(&self) -> Vec<&str> {
        self.scenes.iter().map(Scene::id).collect()
    }

    /// Shape shared by every scene, or `None` for an empty collection.
    ///
    /// Fails with `ShapeMismatch` when scenes disagree.
    pub fn shape(&self) -> Result<Option<(usize, usize)>> {
        let Some(first) = self.scenes.first() else {
            return Ok(None);
        };
        let expected = first.shape();
        for scene in &self.scenes[1..] {
            if scene.shape() != expected {
                return Err(EoError::ShapeMismatch {
                    expected,
                    actual: scene.shape(),
                });
            }
        }
        Ok(Some(expected))
    }

    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }
}

impl<'a> IntoIterator for &'a SceneCollection {
    type Item = &'a Scene;
    type IntoIter = std::slice::Iter<'a, Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

impl IntoIterator for SceneCollection {
    type Item = Scene;
    type IntoIter = std::vec::IntoIter<Scene>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.into_iter()
    }
}

impl FromIterator<Scene> for SceneCollection {
    fn from_iter<T: IntoIterator<Item = Scene>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
