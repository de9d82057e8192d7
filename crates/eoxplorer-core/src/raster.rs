use ndarray::Array2;

use crate::error::{EoError, Result};

/// Sentinel marking a pixel with no valid observation.
///
/// NaN rather than zero, so a valid zero reflectance is never mistaken for a
/// masked pixel.
pub const NO_DATA: f32 = f32::NAN;

#[inline]
pub fn is_no_data(value: f32) -> bool {
    value.is_nan()
}

/// A named-band raster with no temporal dimension.
///
/// Every band shares the raster's `(height, width)` shape. Band order is the
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct Raster {
    shape: (usize, usize),
    bands: Vec<(String, Array2<f32>)>,
}

impl Raster {
    /// Create a raster of the given shape with no bands yet.
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            shape,
            bands: Vec::new(),
        }
    }

    /// The raster with no pixels and no bands. Its every pixel is "no data".
    pub fn empty() -> Self {
        Self::default()
    }

    /// An all-"no data" raster with the given shape and band names.
    pub fn no_data<S: AsRef<str>>(shape: (usize, usize), band_names: &[S]) -> Self {
        let bands = band_names
            .iter()
            .map(|name| (name.as_ref().to_string(), Array2::from_elem(shape, NO_DATA)))
            .collect();
        Self { shape, bands }
    }

    /// Build a raster from `(name, data)` pairs, checking that all bands agree
    /// on shape.
    pub fn from_bands<I, S>(bands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Array2<f32>)>,
        S: Into<String>,
    {
        let mut iter = bands.into_iter().peekable();
        let shape = match iter.peek() {
            Some((_, data)) => data.dim(),
            None => return Ok(Self::empty()),
        };
        let mut raster = Self::new(shape);
        for (name, data) in iter {
            raster.insert_band(name, data)?;
        }
        Ok(raster)
    }

    /// Insert a band, replacing any existing band of the same name.
    pub fn insert_band(&mut self, name: impl Into<String>, data: Array2<f32>) -> Result<()> {
        if self.bands.is_empty() && self.shape == (0, 0) {
            self.shape = data.dim();
        }
        if data.dim() != self.shape {
            return Err(EoError::ShapeMismatch {
                expected: self.shape,
                actual: data.dim(),
            });
        }
        let name = name.into();
        match self.bands.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = data,
            None => self.bands.push((name, data)),
        }
        Ok(())
    }

    pub fn with_band(mut self, name: impl Into<String>, data: Array2<f32>) -> Result<Self> {
        self.insert_band(name, data)?;
        Ok(self)
    }

    pub fn band(&self, name: &str) -> Option<&Array2<f32>> {
        self.bands.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Like [`Raster::band`] but fails with `MissingBand` when absent.
    pub fn require_band(&self, name: &str) -> Result<&Array2<f32>> {
        self.band(name).ok_or_else(|| EoError::MissingBand {
            band: name.to_string(),
        })
    }

    pub fn has_band(&self, name: &str) -> bool {
        self.band(name).is_some()
    }

    pub fn band_names(&self) -> impl Iterator<Item = &str> {
        self.bands.iter().map(|(n, _)| n.as_str())
    }

    pub fn bands(&self) -> impl Iterator<Item = (&str, &Array2<f32>)> {
        self.bands.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub(crate) fn bands_mut(&mut self) -> impl Iterator<Item = (&str, &mut Array2<f32>)> {
        self.bands.iter_mut().map(|(n, d)| (n.as_str(), d))
    }

    /// Rename a band, keeping its position.
    pub fn rename_band(mut self, from: &str, to: impl Into<String>) -> Result<Self> {
        let to = to.into();
        let slot = self
            .bands
            .iter_mut()
            .find(|(n, _)| n == from)
            .ok_or_else(|| EoError::MissingBand {
                band: from.to_string(),
            })?;
        slot.0 = to;
        Ok(self)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape.0
    }

    pub fn width(&self) -> usize {
        self.shape.1
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// True when the raster holds no pixels or no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty() || self.shape.0 * self.shape.1 == 0
    }

    /// True when no band holds a single valid value.
    pub fn is_all_no_data(&self) -> bool {
        self.bands
            .iter()
            .all(|(_, d)| d.iter().all(|&v| is_no_data(v)))
    }
}
