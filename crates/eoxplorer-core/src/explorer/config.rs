use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::collection::{CollectionFilter, DateRange};
use crate::composite::CompositeMethod;
use crate::consts::{
    DEFAULT_CLOUD_THRESHOLD, DEFAULT_COLLECTION_ID, DEFAULT_REFLECTANCE_SCALE, NDVI_BAND,
};
use crate::error::{EoError, Result};
use crate::index::ndvi;
use crate::mask::MaskBits;
use crate::raster::Raster;
use crate::render::VisualizationProfile;
use crate::viewport::{ControlVisibility, NavigationState};

use super::catalog::{default_initial_view, default_places, Place};

/// Everything the explorer needs, loadable from TOML.
///
/// Profiles are validated while deserializing, so a config with a 2-band
/// profile or an inverted range fails to load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfig {
    pub collection_id: String,
    pub date_range: DateRange,
    /// Scenes must be strictly less cloudy than this percentage.
    pub cloud_threshold: f32,
    pub reflectance_scale: f32,
    #[serde(default)]
    pub mask: MaskBits,
    #[serde(default)]
    pub index: IndexConfig,
    pub initial_view: NavigationState,
    #[serde(default = "default_places")]
    pub places: Vec<Place>,
    pub layers: Vec<LayerConfig>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            collection_id: DEFAULT_COLLECTION_ID.to_string(),
            date_range: default_date_range(),
            cloud_threshold: DEFAULT_CLOUD_THRESHOLD,
            reflectance_scale: DEFAULT_REFLECTANCE_SCALE,
            mask: MaskBits::default(),
            index: IndexConfig::default(),
            initial_view: default_initial_view(),
            places: default_places(),
            layers: default_layers(),
        }
    }
}

const DEFAULT_START: NaiveDate = match NaiveDate::from_ymd_opt(2018, 1, 1) {
    Some(d) => d,
    None => panic!("invalid default start date"),
};

// Excluded from the range.
const DEFAULT_END: NaiveDate = match NaiveDate::from_ymd_opt(2018, 6, 30) {
    Some(d) => d,
    None => panic!("invalid default end date"),
};

fn default_date_range() -> DateRange {
    DateRange::from_dates_unchecked(DEFAULT_START, DEFAULT_END)
}

impl ExplorerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| EoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EoError::Config(e.to_string()))
    }

    pub fn collection_filter(&self) -> CollectionFilter {
        CollectionFilter::new(self.date_range)
            .with_cloud_threshold(self.cloud_threshold)
            .with_mask_bits(self.mask.clone())
            .with_reflectance_scale(self.reflectance_scale)
    }

    pub fn validate(&self) -> Result<()> {
        self.collection_filter().validate()?;
        self.initial_view.validate()?;
        for place in &self.places {
            place.navigation()?;
        }
        if self.layers.is_empty() {
            return Err(EoError::Config("at least one layer is required".to_string()));
        }
        Ok(())
    }

    pub fn place(&self, label: &str) -> Result<&Place> {
        self.places
            .iter()
            .find(|p| p.label == label)
            .ok_or_else(|| EoError::UnknownPlace(label.to_string()))
    }
}

/// Band pair and composite the vegetation index is derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    pub nir_band: String,
    pub red_band: String,
    pub composite: CompositeMethod,
}

impl IndexConfig {
    /// The vegetation index of `composite`.
    pub fn compute(&self, composite: &Raster) -> Result<Raster> {
        ndvi(composite, &self.nir_band, &self.red_band)
    }

    /// The raster `profile` displays: the index for a profile over the
    /// index band, the composite itself for anything else.
    pub fn raster_for_profile(
        &self,
        composite: Raster,
        profile: &VisualizationProfile,
    ) -> Result<Raster> {
        if profile.band_names() == [NDVI_BAND] {
            self.compute(&composite)
        } else {
            Ok(composite)
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            nir_band: "B5".to_string(),
            red_band: "B4".to_string(),
            composite: CompositeMethod::Mosaic,
        }
    }
}

/// Which raster a map layer shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSource {
    Median,
    Mosaic,
    /// The vegetation index raster.
    Index,
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => write!(f, "Median composite"),
            Self::Mosaic => write!(f, "Mosaic composite"),
            Self::Index => write!(f, "Vegetation index"),
        }
    }
}

/// One map panel of the explorer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    pub title: String,
    pub source: LayerSource,
    pub profile: VisualizationProfile,
    #[serde(default)]
    pub controls: ControlVisibility,
}

/// The four maps of the app, top-left to bottom-right.
pub fn default_layers() -> Vec<LayerConfig> {
    vec![
        LayerConfig {
            title: "True Color".to_string(),
            source: LayerSource::Median,
            profile: VisualizationProfile::true_color(),
            controls: ControlVisibility::zoom_only(),
        },
        LayerConfig {
            title: "False Color (Urban)".to_string(),
            source: LayerSource::Mosaic,
            profile: VisualizationProfile::false_color_urban(),
            controls: ControlVisibility::hidden(),
        },
        LayerConfig {
            title: "Healthy Vegetation".to_string(),
            source: LayerSource::Mosaic,
            profile: VisualizationProfile::healthy_vegetation(),
            controls: ControlVisibility::scale_only(),
        },
        LayerConfig {
            title: "NDVI".to_string(),
            source: LayerSource::Index,
            profile: VisualizationProfile::ndvi(),
            controls: ControlVisibility::hidden(),
        },
    ]
}
