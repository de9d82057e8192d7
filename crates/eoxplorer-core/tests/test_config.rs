use std::sync::Arc;

use ndarray::Array2;

use eoxplorer_core::composite::CompositeMethod;
use eoxplorer_core::error::EoError;
use eoxplorer_core::explorer::{
    default_explanations, default_places, ExplorerConfig, ExplorerStage, IndexConfig,
    LayerSource,
};
use eoxplorer_core::raster::Raster;
use eoxplorer_core::render::{Layer, VisualizationProfile};

#[test]
fn test_default_config_matches_app() {
    let config = ExplorerConfig::default();
    assert_eq!(config.collection_id, "COPERNICUS/S2");
    assert_eq!(config.cloud_threshold, 20.0);
    assert_eq!(config.reflectance_scale, 10_000.0);
    assert_eq!(config.mask.qa_band, "QA60");
    assert_eq!((config.mask.cloud_bit, config.mask.cirrus_bit), (10, 11));
    assert_eq!(config.index.nir_band, "B5");
    assert_eq!(config.index.red_band, "B4");
    assert_eq!(config.index.composite, CompositeMethod::Mosaic);
    assert_eq!(config.initial_view.zoom, 12.0);

    let titles: Vec<_> = config.layers.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["True Color", "False Color (Urban)", "Healthy Vegetation", "NDVI"]
    );
    let sources: Vec<_> = config.layers.iter().map(|l| l.source).collect();
    assert_eq!(
        sources,
        vec![
            LayerSource::Median,
            LayerSource::Mosaic,
            LayerSource::Mosaic,
            LayerSource::Index
        ]
    );
    assert!(config.layers[0].controls.zoom_control);
    assert!(config.layers[2].controls.scale_control);
    config.validate().unwrap();
}

#[test]
fn test_default_date_range_excludes_end() {
    let config = ExplorerConfig::default();
    assert_eq!(config.date_range.start().to_rfc3339(), "2018-01-01T00:00:00+00:00");
    assert_eq!(config.date_range.end().to_rfc3339(), "2018-06-30T00:00:00+00:00");
    assert!(!config.date_range.contains(config.date_range.end()));
}

#[test]
fn test_config_toml_round_trip() {
    let config = ExplorerConfig::default();
    let text = config.to_toml_string().unwrap();
    assert!(text.contains("2018-01-01"), "got: {text}");
    let parsed = ExplorerConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

fn minimal_toml(bands: &str) -> String {
    format!(
        r#"
collection_id = "COPERNICUS/S2"
cloud_threshold = 20.0
reflectance_scale = 10000.0

[date_range]
start = "2018-01-01"
end = "2018-06-30"

[initial_view]
zoom = 12.0

[initial_view.center]
lon = -9.1695
lat = 38.6917

[[layers]]
title = "Custom"
source = "median"

[layers.profile]
name = "Custom"
bands = {bands}
min = 0.0
max = 0.3
"#
    )
}

#[test]
fn test_config_minimal_toml_uses_defaults() {
    let config = ExplorerConfig::from_toml_str(&minimal_toml(r#"["B4", "B3", "B2"]"#)).unwrap();
    assert_eq!(config.places, default_places());
    assert_eq!(config.index.composite, CompositeMethod::Mosaic);
    assert_eq!(config.layers.len(), 1);
    assert_eq!(config.layers[0].profile.band_names(), vec!["B4", "B3", "B2"]);
}

#[test]
fn test_config_rejects_two_band_profile() {
    assert!(matches!(
        ExplorerConfig::from_toml_str(&minimal_toml(r#"["B4", "B3"]"#)),
        Err(EoError::Config(_))
    ));
}

#[test]
fn test_config_rejects_bad_values() {
    let mut config = ExplorerConfig::default();
    config.reflectance_scale = -1.0;
    assert!(config.validate().is_err());

    let mut config = ExplorerConfig::default();
    config.layers.clear();
    assert!(config.validate().is_err());

    let mut config = ExplorerConfig::default();
    config.initial_view.zoom = 40.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_unknown_field_rejected() {
    let text = format!(
        "colour_scheme = \"dark\"\n{}",
        ExplorerConfig::default().to_toml_string().unwrap()
    );
    assert!(ExplorerConfig::from_toml_str(&text).is_err());
}

#[test]
fn test_nested_unknown_fields_rejected() {
    let base = minimal_toml(r#"["B4", "B3", "B2"]"#);

    let layer_typo = base.replace(
        "source = \"median\"",
        "source = \"median\"\ncontrol = \"zoom\"",
    );
    assert!(matches!(
        ExplorerConfig::from_toml_str(&layer_typo),
        Err(EoError::Config(_))
    ));

    let mask_typo = format!(
        "{base}\n[mask]\nqa_band = \"QA60\"\ncloud_bit = 10\ncirrus_bit = 11\nsnow_bit = 5\n"
    );
    assert!(ExplorerConfig::from_toml_str(&mask_typo).is_err());

    let index_typo = format!(
        "{base}\n[index]\nnir_band = \"B8\"\nred_band = \"B4\"\n\
         composite = \"Median\"\nswir = \"B11\"\n"
    );
    assert!(ExplorerConfig::from_toml_str(&index_typo).is_err());
}

#[test]
fn test_partial_controls_table() {
    let text = minimal_toml(r#"["B4", "B3", "B2"]"#)
        + "\n[layers.controls]\nscale_control = true\n";
    let config = ExplorerConfig::from_toml_str(&text).unwrap();
    let controls = config.layers[0].controls;
    assert!(controls.scale_control);
    assert!(!controls.zoom_control);
}

#[test]
fn test_places_and_explanations() {
    let places = default_places();
    assert_eq!(places.len(), 3);
    assert_eq!(places[0].label, "London, Great Britain");
    assert_eq!(places[2].zoom, 10.0);
    for place in &places {
        place.navigation().unwrap();
    }

    let config = ExplorerConfig::default();
    assert!(config.place("Rio Xingu River, Brazil").is_ok());
    assert!(matches!(config.place("Atlantis"), Err(EoError::UnknownPlace(_))));

    let titles: Vec<_> = default_explanations().iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["What does true color mean?", "What does NDVI mean?"]);
}

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", ExplorerStage::Compositing), "Compositing");
    assert_eq!(format!("{}", ExplorerStage::Querying), "Querying scenes");
}

#[test]
fn test_raster_for_profile_only_derives_index_for_index_profile() {
    let composite = Raster::from_bands(vec![
        ("B4", Array2::from_elem((1, 2), 0.1f32)),
        ("B5", Array2::from_elem((1, 2), 0.3f32)),
    ])
    .unwrap();
    let index = IndexConfig::default();

    let ndvi = index
        .raster_for_profile(composite.clone(), &VisualizationProfile::ndvi())
        .unwrap();
    assert_eq!(ndvi.band_names().collect::<Vec<_>>(), vec!["NDVI"]);
    approx::assert_abs_diff_eq!(ndvi.band("NDVI").unwrap()[[0, 0]], 0.5, epsilon = 1e-6);

    // A profile over bands the composite lacks is reported against the
    // composite, not against a derived index.
    let swir = VisualizationProfile::false_color_urban();
    let raster = index.raster_for_profile(composite, &swir).unwrap();
    assert!(raster.has_band("B4"));
    match Layer::bind(Arc::new(raster), Arc::new(swir)) {
        Err(EoError::UnknownBand { band, .. }) => assert_eq!(band, "B12"),
        other => panic!("expected UnknownBand, got {:?}", other.map(|_| ())),
    }
}
