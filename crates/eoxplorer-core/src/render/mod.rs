pub mod layer;
pub mod profile;
pub mod ramp;
pub mod renderer;

pub use layer::Layer;
pub use profile::{ProfileBands, ProfileConfig, VisualizationProfile};
pub use ramp::{Color, ColorRamp};
pub use renderer::render;
