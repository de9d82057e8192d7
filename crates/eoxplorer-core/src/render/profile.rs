use serde::{Deserialize, Serialize};

use crate::error::{EoError, Result};
use crate::raster::Raster;

use super::ramp::{Color, ColorRamp};

/// Which raster bands a profile displays.
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileBands {
    /// One band, mapped through a color ramp (grayscale without one).
    Single(String),
    /// Red, green, and blue channels.
    Rgb([String; 3]),
}

impl ProfileBands {
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(b) => vec![b.as_str()],
            Self::Rgb(bands) => bands.iter().map(String::as_str).collect(),
        }
    }
}

/// A named way of looking at a raster: bands, value range, and color ramp.
///
/// Validated at construction, so a bound profile never fails on its own
/// shape at render time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileConfig", into = "ProfileConfig")]
pub struct VisualizationProfile {
    name: String,
    bands: ProfileBands,
    min: f32,
    max: f32,
    ramp: Option<ColorRamp>,
}

impl VisualizationProfile {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        bands: Vec<S>,
        min: f32,
        max: f32,
        ramp: Option<ColorRamp>,
    ) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| EoError::InvalidProfile {
            name: name.clone(),
            reason,
        };

        let mut bands: Vec<String> = bands.into_iter().map(Into::into).collect();
        let bands = match bands.len() {
            1 => ProfileBands::Single(bands.remove(0)),
            3 => {
                let b = bands.remove(2);
                let g = bands.remove(1);
                let r = bands.remove(0);
                ProfileBands::Rgb([r, g, b])
            }
            n => return Err(invalid(format!("expected 1 or 3 bands, got {n}"))),
        };
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(invalid(format!("range [{min}, {max}] is not increasing")));
        }
        if ramp.is_some() && matches!(bands, ProfileBands::Rgb(_)) {
            return Err(invalid("a color ramp needs a single-band profile".to_string()));
        }

        Ok(Self {
            name,
            bands,
            min,
            max,
            ramp,
        })
    }

    pub fn rgb(name: impl Into<String>, bands: [&str; 3], min: f32, max: f32) -> Result<Self> {
        Self::new(name, bands.to_vec(), min, max, None)
    }

    pub fn single(
        name: impl Into<String>,
        band: &str,
        min: f32,
        max: f32,
        ramp: Option<ColorRamp>,
    ) -> Result<Self> {
        Self::new(name, vec![band], min, max, ramp)
    }

    /// Red, green, blue: the scene as the eye sees it.
    pub fn true_color() -> Self {
        Self::reflectance_rgb("True Color", ["B4", "B3", "B2"])
    }

    /// SWIR composite separating built-up areas from vegetation.
    pub fn false_color_urban() -> Self {
        Self::reflectance_rgb("False Color (Urban)", ["B12", "B11", "B4"])
    }

    /// NIR, SWIR, blue: healthy vegetation shows bright green.
    pub fn healthy_vegetation() -> Self {
        Self::reflectance_rgb("Healthy Vegetation", ["B8", "B11", "B2"])
    }

    /// NDVI from -1 to 1 through blue, white, green.
    pub fn ndvi() -> Self {
        Self {
            name: "NDVI".to_string(),
            bands: ProfileBands::Single(crate::consts::NDVI_BAND.to_string()),
            min: -1.0,
            max: 1.0,
            ramp: Some(ColorRamp::from_stops(vec![Color::BLUE, Color::WHITE, Color::GREEN])),
        }
    }

    fn reflectance_rgb(name: &str, [r, g, b]: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            bands: ProfileBands::Rgb([r.to_string(), g.to_string(), b.to_string()]),
            min: 0.0,
            max: 0.3,
            ramp: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bands(&self) -> &ProfileBands {
        &self.bands
    }

    pub fn band_names(&self) -> Vec<&str> {
        self.bands.names()
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn ramp(&self) -> Option<&ColorRamp> {
        self.ramp.as_ref()
    }

    /// Clamp `v` to the profile range and map it to `[0, 1]`.
    #[inline]
    pub fn rescale(&self, v: f32) -> f32 {
        (v.clamp(self.min, self.max) - self.min) / (self.max - self.min)
    }

    /// Every referenced band must exist in `raster`. A band-less raster is
    /// "no data" everywhere and accepted as is.
    pub fn check_bands(&self, raster: &Raster) -> Result<()> {
        if raster.band_count() == 0 {
            return Ok(());
        }
        match self.band_names().into_iter().find(|b| !raster.has_band(b)) {
            Some(missing) => Err(EoError::UnknownBand {
                band: missing.to_string(),
                profile: self.name.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Loosely typed profile record as written in configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,
    pub bands: Vec<String>,
    pub min: f32,
    pub max: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<Color>>,
}

impl TryFrom<ProfileConfig> for VisualizationProfile {
    type Error = EoError;

    fn try_from(c: ProfileConfig) -> Result<Self> {
        let ramp = c.palette.map(ColorRamp::new).transpose()?;
        Self::new(c.name, c.bands, c.min, c.max, ramp)
    }
}

impl From<VisualizationProfile> for ProfileConfig {
    fn from(p: VisualizationProfile) -> Self {
        let bands = p.band_names().into_iter().map(str::to_string).collect();
        Self {
            name: p.name,
            bands,
            min: p.min,
            max: p.max,
            palette: p.ramp.map(Vec::from),
        }
    }
}
