use std::sync::Arc;

use image::RgbaImage;

use crate::error::Result;
use crate::raster::Raster;

use super::profile::VisualizationProfile;
use super::renderer::render;

/// A raster paired with the profile it is displayed through.
///
/// Binding checks profile bands against the raster, so a bound layer only
/// fails to render on I/O, never on a band mismatch.
#[derive(Clone, Debug)]
pub struct Layer {
    raster: Arc<Raster>,
    profile: Arc<VisualizationProfile>,
}

impl Layer {
    pub fn bind(raster: Arc<Raster>, profile: Arc<VisualizationProfile>) -> Result<Self> {
        profile.check_bands(&raster)?;
        Ok(Self { raster, profile })
    }

    pub fn raster(&self) -> &Arc<Raster> {
        &self.raster
    }

    pub fn profile(&self) -> &Arc<VisualizationProfile> {
        &self.profile
    }

    /// Same raster, different profile.
    pub fn with_profile(&self, profile: Arc<VisualizationProfile>) -> Result<Self> {
        Self::bind(Arc::clone(&self.raster), profile)
    }

    pub fn render(&self) -> Result<RgbaImage> {
        render(&self.raster, &self.profile)
    }
}
