pub mod median;
pub mod mosaic;

use std::fmt;

use ndarray::{Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_QA_BAND, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::raster::{Raster, NO_DATA};
use crate::scene::SceneCollection;

pub use median::median_of;

/// How a collection is reduced over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeMethod {
    /// Per-pixel median of valid observations. Order independent.
    #[default]
    Median,
    /// First valid observation in collection order wins.
    Mosaic,
}

impl fmt::Display for CompositeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => write!(f, "Median"),
            Self::Mosaic => write!(f, "Mosaic"),
        }
    }
}

/// Reduces a scene collection into a single raster.
#[derive(Clone, Debug)]
pub struct TemporalCompositor {
    excluded: Vec<String>,
}

impl Default for TemporalCompositor {
    fn default() -> Self {
        Self {
            excluded: vec![DEFAULT_QA_BAND.to_string()],
        }
    }
}

impl TemporalCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compositor skipping the given bands (typically the QA band).
    pub fn excluding<I, S>(bands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: bands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn median(&self, collection: &SceneCollection) -> Result<Raster> {
        self.composite(collection, CompositeMethod::Median)
    }

    pub fn mosaic(&self, collection: &SceneCollection) -> Result<Raster> {
        self.composite(collection, CompositeMethod::Mosaic)
    }

    /// Reduce `collection`. An empty collection yields the empty raster.
    pub fn composite(
        &self,
        collection: &SceneCollection,
        method: CompositeMethod,
    ) -> Result<Raster> {
        let Some(shape) = collection.shape()? else {
            debug!(%method, "Compositing empty collection");
            return Ok(Raster::empty());
        };

        let bands = self.composite_bands(collection);
        info!(
            %method,
            scenes = collection.len(),
            bands = bands.len(),
            height = shape.0,
            width = shape.1,
            "Compositing collection"
        );

        let mut raster = Raster::new(shape);
        for band in &bands {
            let stack: Vec<&Array2<f32>> = collection
                .iter()
                .filter_map(|scene| scene.band(band))
                .collect();
            let data = match method {
                CompositeMethod::Median => median::median_band(&stack, shape),
                CompositeMethod::Mosaic => mosaic::mosaic_band(&stack, shape),
            };
            raster.insert_band(band.clone(), data)?;
        }
        Ok(raster)
    }

    /// Like [`TemporalCompositor::composite`], but an empty collection yields
    /// an all-"no data" raster of the given shape and bands.
    pub fn composite_with_shape<S: AsRef<str>>(
        &self,
        collection: &SceneCollection,
        method: CompositeMethod,
        shape: (usize, usize),
        bands: &[S],
    ) -> Result<Raster> {
        if collection.is_empty() {
            return Ok(Raster::no_data(shape, bands));
        }
        self.composite(collection, method)
    }

    /// Bands present in every scene, in the first scene's order.
    pub fn composite_bands(&self, collection: &SceneCollection) -> Vec<String> {
        let Some(first) = collection.scenes().first() else {
            return Vec::new();
        };
        first
            .raster()
            .band_names()
            .filter(|name| !self.excluded.iter().any(|e| e == name))
            .filter(|name| collection.iter().all(|s| s.raster().has_band(name)))
            .map(str::to_string)
            .collect()
    }
}

/// Median composite, skipping the default QA band.
pub fn median_composite(collection: &SceneCollection) -> Result<Raster> {
    TemporalCompositor::default().median(collection)
}

/// Mosaic composite, skipping the default QA band.
pub fn mosaic_composite(collection: &SceneCollection) -> Result<Raster> {
    TemporalCompositor::default().mosaic(collection)
}

/// Allocate a band and fill it row by row, in parallel for large rasters.
pub(crate) fn fill_rows<F>(shape: (usize, usize), fill_row: F) -> Array2<f32>
where
    F: Fn(usize, ArrayViewMut1<f32>) + Sync,
{
    let (h, w) = shape;
    let mut out = Array2::from_elem(shape, NO_DATA);
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, line)| fill_row(row, line));
    } else {
        for (row, line) in out.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(row, line);
        }
    }
    out
}
