use tracing::debug;

use crate::consts::{DEFAULT_CLOUD_THRESHOLD, DEFAULT_REFLECTANCE_SCALE};
use crate::error::{EoError, Result};
use crate::mask::{apply_mask, cloud_mask, MaskBits};
use crate::raster::is_no_data;
use crate::scene::{Scene, SceneCollection, SceneMetadata};

use super::date_range::DateRange;

/// Parameters turning a raw scene list into a composite-ready collection.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionFilter {
    pub date_range: DateRange,
    /// Scenes must have a cloud percentage strictly below this.
    pub cloud_threshold: f32,
    pub mask_bits: MaskBits,
    /// Digital numbers are divided by this to obtain reflectance.
    pub reflectance_scale: f32,
}

impl CollectionFilter {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            cloud_threshold: DEFAULT_CLOUD_THRESHOLD,
            mask_bits: MaskBits::default(),
            reflectance_scale: DEFAULT_REFLECTANCE_SCALE,
        }
    }

    pub fn with_cloud_threshold(mut self, threshold: f32) -> Self {
        self.cloud_threshold = threshold;
        self
    }

    pub fn with_mask_bits(mut self, bits: MaskBits) -> Self {
        self.mask_bits = bits;
        self
    }

    pub fn with_reflectance_scale(mut self, scale: f32) -> Self {
        self.reflectance_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cloud_threshold.is_finite() {
            return Err(EoError::Config(format!(
                "cloud threshold must be finite, got {}",
                self.cloud_threshold
            )));
        }
        if !(self.reflectance_scale.is_finite() && self.reflectance_scale > 0.0) {
            return Err(EoError::Config(format!(
                "reflectance scale must be positive, got {}",
                self.reflectance_scale
            )));
        }
        self.mask_bits.validate()
    }

    /// Date and cloud-cover test on catalog metadata alone.
    pub fn accepts(&self, metadata: &SceneMetadata) -> bool {
        self.date_range.contains(metadata.acquired)
            && metadata.cloud_percentage < self.cloud_threshold
    }

    /// Filter, order, and mask `scenes`.
    ///
    /// An empty result is a valid collection, not an error. Running the same
    /// filter over its own output returns an identical collection.
    pub fn build<I>(&self, scenes: I) -> Result<SceneCollection>
    where
        I: IntoIterator<Item = Scene>,
    {
        self.validate()?;

        let mut kept: Vec<Scene> = scenes
            .into_iter()
            .filter(|s| self.accepts(s.metadata()))
            .collect();
        debug!(
            kept = kept.len(),
            range = %self.date_range,
            threshold = self.cloud_threshold,
            "Filtered scenes"
        );

        sort_by_cloud_cover(&mut kept);

        let prepared = kept
            .into_iter()
            .map(|s| prepare_scene(s, &self.mask_bits, self.reflectance_scale))
            .collect::<Result<Vec<_>>>()?;

        Ok(SceneCollection::new(prepared))
    }
}

/// Least cloudy first; ties broken by acquisition time.
pub fn sort_by_cloud_cover(scenes: &mut [Scene]) {
    scenes.sort_by(|a, b| {
        a.cloud_percentage()
            .total_cmp(&b.cloud_percentage())
            .then_with(|| a.acquired().cmp(&b.acquired()))
    });
}

/// Mask cloudy pixels to "no data" and scale digital numbers to reflectance.
///
/// The QA band is kept raw so the mask can be recomputed. Scenes already
/// prepared are returned unchanged.
pub fn prepare_scene(scene: Scene, bits: &MaskBits, reflectance_scale: f32) -> Result<Scene> {
    if scene.is_prepared() {
        return Ok(scene);
    }
    let mask = cloud_mask(&scene, bits)?;
    let (metadata, mut raster) = scene.into_parts();
    apply_mask(&mut raster, &mask, &bits.qa_band)?;

    for (name, data) in raster.bands_mut() {
        if name == bits.qa_band {
            continue;
        }
        data.mapv_inplace(|v| if is_no_data(v) { v } else { v / reflectance_scale });
    }

    debug!(
        scene = %metadata.id,
        valid = mask.valid_count(),
        total = mask.data.len(),
        "Masked scene"
    );
    Ok(Scene::prepared(metadata, raster))
}
