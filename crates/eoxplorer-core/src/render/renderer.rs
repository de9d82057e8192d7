use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::raster::{is_no_data, Raster};

use super::profile::{ProfileBands, VisualizationProfile};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Render `raster` through `profile` into an RGBA image.
///
/// Values are clamped to the profile range before rescaling. Pixels with
/// "no data" in any displayed band are fully transparent, and a band-less
/// raster renders fully transparent.
pub fn render(raster: &Raster, profile: &VisualizationProfile) -> Result<RgbaImage> {
    profile.check_bands(raster)?;
    let (h, w) = raster.shape();
    if raster.band_count() == 0 {
        return Ok(RgbaImage::from_pixel(w as u32, h as u32, TRANSPARENT));
    }

    let to_byte = |v: f32| (profile.rescale(v) * 255.0).round() as u8;

    let img = match profile.bands() {
        ProfileBands::Rgb([r, g, b]) => {
            let (r, g, b) = (
                raster.require_band(r)?,
                raster.require_band(g)?,
                raster.require_band(b)?,
            );
            RgbaImage::from_fn(w as u32, h as u32, |x, y| {
                let idx = [y as usize, x as usize];
                let (vr, vg, vb) = (r[idx], g[idx], b[idx]);
                if is_no_data(vr) || is_no_data(vg) || is_no_data(vb) {
                    TRANSPARENT
                } else {
                    Rgba([to_byte(vr), to_byte(vg), to_byte(vb), 255])
                }
            })
        }
        ProfileBands::Single(band) => {
            let data = raster.require_band(band)?;
            RgbaImage::from_fn(w as u32, h as u32, |x, y| {
                let v = data[[y as usize, x as usize]];
                if is_no_data(v) {
                    return TRANSPARENT;
                }
                match profile.ramp() {
                    Some(ramp) => {
                        let c = ramp.sample(profile.rescale(v));
                        Rgba([c.r, c.g, c.b, 255])
                    }
                    None => {
                        let l = to_byte(v);
                        Rgba([l, l, l, 255])
                    }
                }
            })
        }
    };
    Ok(img)
}
