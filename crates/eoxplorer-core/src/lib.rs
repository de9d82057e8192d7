pub mod error;
pub mod consts;
pub mod raster;
pub mod scene;
pub mod mask;
pub mod collection;
pub mod composite;
pub mod index;
pub mod render;
pub mod viewport;
pub mod source;
pub mod io;
pub mod explorer;
