/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Sentinel-2 quality-assurance band carrying the opaque/cirrus cloud flags.
pub const DEFAULT_QA_BAND: &str = "QA60";

/// QA60 bit 10: opaque clouds.
pub const DEFAULT_CLOUD_BIT: u8 = 10;

/// QA60 bit 11: cirrus clouds.
pub const DEFAULT_CIRRUS_BIT: u8 = 11;

/// Divisor converting Sentinel-2 L1C digital numbers to TOA reflectance.
pub const DEFAULT_REFLECTANCE_SCALE: f32 = 10_000.0;

/// Scenes at or above this cloudy-pixel percentage are dropped.
pub const DEFAULT_CLOUD_THRESHOLD: f32 = 20.0;

/// Catalog id of the Sentinel-2 TOA collection.
pub const DEFAULT_COLLECTION_ID: &str = "COPERNICUS/S2";

/// Band name given to a normalized-difference result unless renamed.
pub const DEFAULT_ND_BAND: &str = "ND";

/// Band name of the vegetation index.
pub const NDVI_BAND: &str = "NDVI";

/// Zoom limits accepted by the viewport linker.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 24.0;
