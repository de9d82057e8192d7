//! Band arithmetic on rasters.

use ndarray::Zip;
use tracing::debug;

use crate::consts::{DEFAULT_ND_BAND, NDVI_BAND, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::raster::{is_no_data, Raster, NO_DATA};

/// `(a - b) / (a + b)` clamped to `[-1, 1]`.
///
/// "No data" when either input is "no data" or `a + b == 0`.
#[inline]
pub fn normalized_difference_value(a: f32, b: f32) -> f32 {
    if is_no_data(a) || is_no_data(b) {
        return NO_DATA;
    }
    let sum = a + b;
    if sum == 0.0 {
        return NO_DATA;
    }
    ((a - b) / sum).clamp(-1.0, 1.0)
}

/// Normalized difference of two bands, as a single-band raster named `ND`.
pub fn normalized_difference(raster: &Raster, band_a: &str, band_b: &str) -> Result<Raster> {
    normalized_difference_named(raster, band_a, band_b, DEFAULT_ND_BAND)
}

/// Normalized difference written to a band called `output`.
///
/// A band-less raster is "no data" everywhere and yields an all-"no data"
/// `output` band instead of `MissingBand`.
pub fn normalized_difference_named(
    raster: &Raster,
    band_a: &str,
    band_b: &str,
    output: &str,
) -> Result<Raster> {
    if raster.band_count() == 0 {
        return Ok(Raster::no_data(raster.shape(), &[output]));
    }
    let a = raster.require_band(band_a)?;
    let b = raster.require_band(band_b)?;
    let (h, w) = raster.shape();

    let zip = Zip::from(a).and(b);
    let data = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_map_collect(|&a, &b| normalized_difference_value(a, b))
    } else {
        zip.map_collect(|&a, &b| normalized_difference_value(a, b))
    };
    debug!(band_a, band_b, output, "Computed normalized difference");

    Raster::new(raster.shape()).with_band(output, data)
}

/// NDVI from the near-infrared and red bands.
pub fn ndvi(raster: &Raster, nir: &str, red: &str) -> Result<Raster> {
    normalized_difference_named(raster, nir, red, NDVI_BAND)
}
