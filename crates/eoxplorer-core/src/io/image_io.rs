use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma, Rgba, RgbaImage};
use ndarray::Array2;
use tracing::warn;

use crate::error::Result;
use crate::raster::is_no_data;

/// Band file extensions understood by [`load_band`].
pub const BAND_EXTENSIONS: &[&str] = &["tif", "tiff", "png"];

/// Load a single-band image as raw digital numbers.
///
/// Samples are read as 16-bit gray and kept unnormalised, so a Sentinel-2
/// DN of 1234 stays 1234.0.
pub fn load_band(path: &Path) -> Result<Array2<f32>> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for (x, y, pixel) in gray.enumerate_pixels() {
        data[[y as usize, x as usize]] = pixel.0[0] as f32;
    }

    Ok(data)
}

/// Save a band of digital numbers as 16-bit grayscale, format from the
/// extension (TIFF unless `.png`). "No data" is written as 0.
pub fn save_band(data: &Array2<f32>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let mut img = ImageBuffer::<Luma<u16>, Vec<u16>>::new(w as u32, h as u32);
    for ((row, col), &v) in data.indexed_iter() {
        let dn = if is_no_data(v) { 0 } else { v.round().clamp(0.0, 65535.0) as u16 };
        img.put_pixel(col as u32, row as u32, Luma([dn]));
    }

    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => ImageFormat::Png,
        _ => ImageFormat::Tiff,
    };
    img.save_with_format(path, format)?;
    Ok(())
}

/// Save a rendered viewport as 8-bit RGBA PNG.
///
/// A zero-sized render (a map over no imagery at all) is written as a single
/// transparent pixel, since PNG cannot hold an empty image.
pub fn save_rendered(image: &RgbaImage, path: &Path) -> Result<()> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        warn!(path = %path.display(), "Empty render, writing a transparent placeholder");
        let blank = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        blank.save_with_format(path, ImageFormat::Png)?;
        return Ok(());
    }
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
