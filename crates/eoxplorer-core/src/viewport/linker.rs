use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::{EoError, Result};
use crate::render::Layer;

use super::events::{NavigationChanged, ProfileSelected, ViewportEvent, ViewportListener};
use super::state::{ControlVisibility, NavigationState, Viewport, ViewportId};

/// Viewports whose navigation state is kept identical.
#[derive(Clone, Debug)]
pub struct ViewportGroup {
    navigation: NavigationState,
    viewports: Vec<Viewport>,
}

impl ViewportGroup {
    pub fn new(initial: NavigationState) -> Result<Self> {
        initial.validate()?;
        Ok(Self {
            navigation: initial,
            viewports: Vec::new(),
        })
    }

    /// Add a viewport. It starts at the group's current navigation state.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        layer: Layer,
        controls: ControlVisibility,
    ) -> ViewportId {
        let id = ViewportId(self.viewports.len());
        self.viewports.push(Viewport {
            id,
            title: title.into(),
            navigation: self.navigation,
            layer,
            controls,
        });
        id
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn get(&self, id: ViewportId) -> Result<&Viewport> {
        self.viewports
            .get(id.0)
            .ok_or(EoError::UnknownViewport(id.0))
    }

    fn get_mut(&mut self, id: ViewportId) -> Result<&mut Viewport> {
        self.viewports
            .get_mut(id.0)
            .ok_or(EoError::UnknownViewport(id.0))
    }

    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    pub fn is_synchronized(&self) -> bool {
        self.viewports
            .iter()
            .all(|v| v.navigation == self.navigation)
    }
}

/// Applies viewport events to a group and fans them out to subscribers.
///
/// Every event is applied under one write lock: readers see the group
/// before or after an event, never in between. Invalid events are dropped
/// without touching any viewport.
///
/// Applying an event and notifying listeners happen under one dispatch
/// lock, so listeners observe events in the order they were applied and
/// the last notification always matches the group. Listeners must not
/// feed events back into the same linker from their callbacks.
pub struct ViewportLinker {
    group: RwLock<ViewportGroup>,
    dispatch: Mutex<()>,
    listeners: Vec<Arc<dyn ViewportListener>>,
}

impl ViewportLinker {
    pub fn new(group: ViewportGroup) -> Self {
        Self {
            group: RwLock::new(group),
            dispatch: Mutex::new(()),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Arc<dyn ViewportListener>) {
        self.listeners.push(listener);
    }

    pub fn handle(&self, event: impl Into<ViewportEvent>) -> Result<Vec<ViewportId>> {
        match event.into() {
            ViewportEvent::Navigation(e) => self.navigate(e),
            ViewportEvent::Profile(e) => self.select_profile(e).map(|id| vec![id]),
        }
    }

    /// Move every viewport to the event's center and zoom.
    ///
    /// Returns the viewports that followed the origin. The origin itself is
    /// updated but not re-notified.
    pub fn navigate(&self, event: NavigationChanged) -> Result<Vec<ViewportId>> {
        let state = event.state();
        state.validate()?;

        let _dispatch = self.dispatch();
        let followers = {
            let mut group = self.write();
            group.get(event.origin)?;
            group.navigation = state;
            for viewport in &mut group.viewports {
                viewport.navigation = state;
            }
            let followers: Vec<ViewportId> = group
                .viewports
                .iter()
                .map(|v| v.id)
                .filter(|id| *id != event.origin)
                .collect();
            followers
        };

        debug!(
            origin = %event.origin,
            center = %state.center,
            zoom = state.zoom,
            followers = followers.len(),
            "Navigation applied"
        );
        for id in &followers {
            for listener in &self.listeners {
                listener.on_navigation(*id, &state);
            }
        }
        Ok(followers)
    }

    /// Jump the whole group to `state`, as if `origin` had been moved there.
    pub fn set_center(
        &self,
        origin: ViewportId,
        state: NavigationState,
    ) -> Result<Vec<ViewportId>> {
        self.navigate(NavigationChanged::new(origin, state.center, state.zoom))
    }

    /// Rebind one viewport's profile. Fails with `UnknownBand` when the
    /// viewport's raster lacks a profile band; other viewports are untouched.
    pub fn select_profile(&self, event: ProfileSelected) -> Result<ViewportId> {
        let _dispatch = self.dispatch();
        {
            let mut group = self.write();
            let viewport = group.get_mut(event.viewport)?;
            let layer = viewport.layer.with_profile(Arc::clone(&event.profile))?;
            viewport.layer = layer;
        }
        info!(viewport = %event.viewport, profile = event.profile.name(), "Profile selected");
        for listener in &self.listeners {
            listener.on_profile(event.viewport, &event.profile);
        }
        Ok(event.viewport)
    }

    /// Consistent copy of the whole group.
    pub fn snapshot(&self) -> ViewportGroup {
        self.read().clone()
    }

    pub fn navigation(&self) -> NavigationState {
        self.read().navigation
    }

    pub fn viewport(&self, id: ViewportId) -> Result<Viewport> {
        self.read().get(id).cloned()
    }

    pub fn layer(&self, id: ViewportId) -> Result<Layer> {
        self.read().get(id).map(|v| v.layer.clone())
    }

    pub fn ids(&self) -> Vec<ViewportId> {
        self.read().viewports.iter().map(|v| v.id).collect()
    }

    fn dispatch(&self) -> MutexGuard<'_, ()> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewportGroup> {
        self.group.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewportGroup> {
        self.group.write().unwrap_or_else(PoisonError::into_inner)
    }
}
