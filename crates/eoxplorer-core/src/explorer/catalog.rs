use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::viewport::{LonLat, NavigationState};

/// A named sample location offered to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Place {
    pub label: String,
    pub center: LonLat,
    pub zoom: f64,
}

impl Place {
    pub fn new(label: impl Into<String>, lon: f64, lat: f64, zoom: f64) -> Self {
        Self {
            label: label.into(),
            center: LonLat::new(lon, lat),
            zoom,
        }
    }

    pub fn navigation(&self) -> Result<NavigationState> {
        NavigationState::new(self.center, self.zoom)
    }
}

pub fn default_places() -> Vec<Place> {
    vec![
        Place::new("London, Great Britain", -0.126665, 51.507033, 11.0),
        Place::new("Rio Xingu River, Brazil", -52.980358, -10.271681, 11.0),
        Place::new("Anholt Island, Denmark", 11.578340, 56.714116, 10.0),
    ]
}

/// Where all maps start: Lisbon and the Tagus estuary.
pub fn default_initial_view() -> NavigationState {
    NavigationState {
        center: LonLat::new(-9.1695, 38.6917),
        zoom: 12.0,
    }
}

/// A titled help text shown next to the maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explanation {
    pub title: &'static str,
    pub text: &'static str,
}

pub fn default_explanations() -> &'static [Explanation] {
    &[
        Explanation {
            title: "What does true color mean?",
            text: "True color composite uses visible light bands red (B04), green (B03) and \
                   blue (B02) in the corresponding red, green and blue color channels, \
                   resulting in a natural colored result, that is a good representation of \
                   the Earth as humans would see it naturally.",
        },
        Explanation {
            title: "What does NDVI mean?",
            text: "The Normalized Difference Vegetation Index compares near-infrared and red \
                   reflectance. Healthy vegetation reflects strongly in the near-infrared and \
                   absorbs red light, so values close to 1 (green) indicate dense, vital \
                   vegetation while values near or below 0 (white to blue) indicate bare \
                   soil, built-up areas or water.",
        },
    ]
}

pub fn find_explanation(title: &str) -> Option<&'static Explanation> {
    default_explanations().iter().find(|e| e.title == title)
}
