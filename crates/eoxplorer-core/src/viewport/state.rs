use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::error::{EoError, Result};
use crate::render::Layer;

/// Geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn validate(&self) -> Result<()> {
        if !(-180.0..=180.0).contains(&self.lon) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(EoError::InvalidNavigation(format!(
                "center ({}, {}) is outside lon [-180, 180] / lat [-90, 90]",
                self.lon, self.lat
            )));
        }
        Ok(())
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lon, self.lat)
    }
}

/// Where a viewport looks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationState {
    pub center: LonLat,
    pub zoom: f64,
}

impl NavigationState {
    pub fn new(center: LonLat, zoom: f64) -> Result<Self> {
        let state = Self { center, zoom };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(EoError::InvalidNavigation(format!(
                "zoom {} is outside [{MIN_ZOOM}, {MAX_ZOOM}]",
                self.zoom
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewportId(pub usize);

impl fmt::Display for ViewportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewport#{}", self.0)
    }
}

/// Which map widgets the presentation layer shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlVisibility {
    pub zoom_control: bool,
    pub scale_control: bool,
    pub layer_list: bool,
}

impl ControlVisibility {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn zoom_only() -> Self {
        Self {
            zoom_control: true,
            ..Self::default()
        }
    }

    pub fn scale_only() -> Self {
        Self {
            scale_control: true,
            ..Self::default()
        }
    }
}

/// One map panel: a bound layer and its navigation state.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub id: ViewportId,
    pub title: String,
    pub navigation: NavigationState,
    pub layer: Layer,
    pub controls: ControlVisibility,
}
