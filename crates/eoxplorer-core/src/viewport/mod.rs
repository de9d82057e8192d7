pub mod events;
pub mod linker;
pub mod state;

pub use events::{NavigationChanged, ProfileSelected, ViewportEvent, ViewportListener};
pub use linker::{ViewportGroup, ViewportLinker};
pub use state::{ControlVisibility, LonLat, NavigationState, Viewport, ViewportId};
