use std::sync::Arc;

use crate::render::VisualizationProfile;

use super::state::{LonLat, NavigationState, ViewportId};

/// The user panned or zoomed `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationChanged {
    pub origin: ViewportId,
    pub center: LonLat,
    pub zoom: f64,
}

impl NavigationChanged {
    pub fn new(origin: ViewportId, center: LonLat, zoom: f64) -> Self {
        Self {
            origin,
            center,
            zoom,
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            center: self.center,
            zoom: self.zoom,
        }
    }
}

/// The user picked a different profile for `viewport`.
#[derive(Clone, Debug)]
pub struct ProfileSelected {
    pub viewport: ViewportId,
    pub profile: Arc<VisualizationProfile>,
}

/// Events the presentation layer emits back to the core.
#[derive(Clone, Debug)]
pub enum ViewportEvent {
    Navigation(NavigationChanged),
    Profile(ProfileSelected),
}

impl From<NavigationChanged> for ViewportEvent {
    fn from(e: NavigationChanged) -> Self {
        Self::Navigation(e)
    }
}

impl From<ProfileSelected> for ViewportEvent {
    fn from(e: ProfileSelected) -> Self {
        Self::Profile(e)
    }
}

/// Subscriber to viewport changes, typically the presentation layer.
///
/// Called after the change is fully applied to the group. All methods have
/// default no-op implementations.
pub trait ViewportListener: Send + Sync {
    /// `viewport` was moved to follow another viewport of the group.
    fn on_navigation(&self, _viewport: ViewportId, _state: &NavigationState) {}

    /// `viewport` now displays through `profile`.
    fn on_profile(&self, _viewport: ViewportId, _profile: &VisualizationProfile) {}
}
