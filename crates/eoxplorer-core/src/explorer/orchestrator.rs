use std::sync::Arc;

use image::RgbaImage;
use tracing::info;

use crate::collection::SceneCollectionPipeline;
use crate::composite::{CompositeMethod, TemporalCompositor};
use crate::error::Result;
use crate::raster::Raster;
use crate::render::Layer;
use crate::scene::{Scene, SceneCollection};
use crate::source::ImagerySource;
use crate::viewport::{ViewportGroup, ViewportId, ViewportLinker};

use super::catalog::{find_explanation, Explanation};
use super::config::{ExplorerConfig, LayerSource};
use super::types::{ExplorerStage, NoOpReporter, ProgressReporter};

/// A fully built explorer: the masked collection, the rasters derived from
/// it, and the linked viewports displaying them.
pub struct Explorer {
    config: ExplorerConfig,
    collection: Arc<SceneCollection>,
    median: Option<Arc<Raster>>,
    mosaic: Option<Arc<Raster>>,
    index: Option<Arc<Raster>>,
    linker: ViewportLinker,
}

impl Explorer {
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn collection(&self) -> &Arc<SceneCollection> {
        &self.collection
    }

    /// The composite for `method`, if some layer or the index needed it.
    pub fn composite(&self, method: CompositeMethod) -> Option<&Arc<Raster>> {
        match method {
            CompositeMethod::Median => self.median.as_ref(),
            CompositeMethod::Mosaic => self.mosaic.as_ref(),
        }
    }

    pub fn index(&self) -> Option<&Arc<Raster>> {
        self.index.as_ref()
    }

    pub fn linker(&self) -> &ViewportLinker {
        &self.linker
    }

    pub fn linker_mut(&mut self) -> &mut ViewportLinker {
        &mut self.linker
    }

    /// Center every map on a sample place. The move originates from the
    /// first map, as the location picker drives it.
    pub fn select_place(&self, label: &str) -> Result<Vec<ViewportId>> {
        let state = self.config.place(label)?.navigation()?;
        info!(place = label, "Place selected");
        self.linker.set_center(ViewportId(0), state)
    }

    pub fn explanation(&self, title: &str) -> Option<&'static Explanation> {
        find_explanation(title)
    }

    /// Render every viewport in group order.
    pub fn render_all(&self) -> Result<Vec<(ViewportId, String, RgbaImage)>> {
        self.render_all_reported(&NoOpReporter)
    }

    pub fn render_all_reported(
        &self,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<(ViewportId, String, RgbaImage)>> {
        let group = self.linker.snapshot();
        reporter.begin_stage(ExplorerStage::Rendering, Some(group.len()));
        let mut rendered = Vec::with_capacity(group.len());
        for (i, viewport) in group.viewports().iter().enumerate() {
            let image = viewport.layer.render()?;
            rendered.push((viewport.id, viewport.title.clone(), image));
            reporter.advance(i + 1);
        }
        reporter.finish_stage();
        Ok(rendered)
    }
}

/// Build the explorer with a thread-safe progress reporter.
pub fn run_explorer_reported(
    config: ExplorerConfig,
    source: &dyn ImagerySource,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<Explorer> {
    config.validate()?;

    reporter.begin_stage(ExplorerStage::Querying, None);
    let filter = config.collection_filter();
    let scenes =
        SceneCollectionPipeline::new(source).query(&config.collection_id, &filter.date_range)?;
    reporter.finish_stage();

    // Size of the area of interest, kept so an all-cloudy window still
    // renders blank maps of the right extent.
    let raw_shape = scenes.first().map(Scene::shape);

    reporter.begin_stage(ExplorerStage::Filtering, Some(scenes.len()));
    let collection = filter.build(scenes)?;
    reporter.finish_stage();
    info!(
        scenes = collection.len(),
        ids = ?collection.ids(),
        "Collection ready"
    );

    let needs = |method: CompositeMethod| {
        config.layers.iter().any(|l| match l.source {
            LayerSource::Median => method == CompositeMethod::Median,
            LayerSource::Mosaic => method == CompositeMethod::Mosaic,
            LayerSource::Index => method == config.index.composite,
        })
    };

    let compositor = TemporalCompositor::excluding([config.mask.qa_band.clone()]);
    let methods: Vec<CompositeMethod> = [CompositeMethod::Median, CompositeMethod::Mosaic]
        .into_iter()
        .filter(|m| needs(*m))
        .collect();

    reporter.begin_stage(ExplorerStage::Compositing, Some(methods.len()));
    let placeholder = placeholder_bands(&config);
    let mut median = None;
    let mut mosaic = None;
    for (i, method) in methods.iter().enumerate() {
        let raster = match raw_shape {
            Some(shape) => {
                compositor.composite_with_shape(&collection, *method, shape, &placeholder)?
            }
            None => compositor.composite(&collection, *method)?,
        };
        let raster = Arc::new(raster);
        match method {
            CompositeMethod::Median => median = Some(raster),
            CompositeMethod::Mosaic => mosaic = Some(raster),
        }
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    let index = if config.layers.iter().any(|l| l.source == LayerSource::Index) {
        reporter.begin_stage(ExplorerStage::Index, None);
        let base = match config.index.composite {
            CompositeMethod::Median => median.as_deref(),
            CompositeMethod::Mosaic => mosaic.as_deref(),
        };
        let raster = match base {
            Some(base) => config.index.compute(base)?,
            None => Raster::empty(),
        };
        reporter.finish_stage();
        Some(Arc::new(raster))
    } else {
        None
    };

    reporter.begin_stage(ExplorerStage::Binding, Some(config.layers.len()));
    let mut group = ViewportGroup::new(config.initial_view)?;
    for (i, layer_config) in config.layers.iter().enumerate() {
        let raster = match layer_config.source {
            LayerSource::Median => median.as_ref(),
            LayerSource::Mosaic => mosaic.as_ref(),
            LayerSource::Index => index.as_ref(),
        }
        .map(Arc::clone)
        .unwrap_or_else(|| Arc::new(Raster::empty()));
        let layer = Layer::bind(raster, Arc::new(layer_config.profile.clone()))?;
        group.add(layer_config.title.clone(), layer, layer_config.controls);
        reporter.advance(i + 1);
    }
    reporter.finish_stage();
    info!(viewports = group.len(), "Viewports linked");

    Ok(Explorer {
        config,
        collection: Arc::new(collection),
        median,
        mosaic,
        index,
        linker: ViewportLinker::new(group),
    })
}

/// Bands an all-"no data" composite needs so every layer and the index
/// can bind to it.
fn placeholder_bands(config: &ExplorerConfig) -> Vec<String> {
    let profile_bands = config
        .layers
        .iter()
        .filter(|l| l.source != LayerSource::Index)
        .flat_map(|l| l.profile.band_names());
    let index_bands = [config.index.nir_band.as_str(), config.index.red_band.as_str()];

    let mut bands: Vec<String> = Vec::new();
    for band in profile_bands.chain(index_bands) {
        if !bands.iter().any(|b| b == band) {
            bands.push(band.to_string());
        }
    }
    bands
}

/// Build the explorer without progress reporting.
pub fn run_explorer(config: ExplorerConfig, source: &dyn ImagerySource) -> Result<Explorer> {
    run_explorer_reported(config, source, Arc::new(NoOpReporter))
}
