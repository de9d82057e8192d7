mod common;

use ndarray::array;
use tempfile::TempDir;

use eoxplorer_core::collection::DateRange;
use eoxplorer_core::error::EoError;
use eoxplorer_core::io::image_io::{load_band, save_band};
use eoxplorer_core::source::directory::{DirectorySource, SCENE_MANIFEST};
use eoxplorer_core::source::{ImagerySource, MemorySource};

use common::{filter_2018, meta, scene_with, ts, uniform_scene, CLOUD};

fn first_half_2018() -> DateRange {
    DateRange::parse("2018-01-01", "2018-06-30").unwrap()
}

#[test]
fn test_band_round_trip_keeps_digital_numbers() {
    let dir = TempDir::new().unwrap();
    let data = array![[0.0f32, 1234.0, 65535.0], [f32::NAN, 10.0, 9999.0]];
    for name in ["B4.tif", "B4.png"] {
        let path = dir.path().join(name);
        save_band(&data, &path).unwrap();
        let back = load_band(&path).unwrap();
        assert_eq!(back.dim(), (2, 3));
        assert_eq!(back[[0, 1]], 1234.0);
        assert_eq!(back[[0, 2]], 65535.0);
        assert_eq!(back[[1, 0]], 0.0, "no data is written as 0");
        assert_eq!(back[[1, 2]], 9999.0);
    }
}

#[test]
fn test_directory_source_round_trip() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");

    let march = scene_with(
        "S2A_20180305",
        ts(2018, 3, 5),
        12.5,
        vec![
            ("B4", array![[1000.0, 2000.0], [3000.0, 4000.0]]),
            ("QA60", array![[0.0, 1024.0], [0.0, 2048.0]]),
        ],
    );
    let january = uniform_scene("S2B_20180110", ts(2018, 1, 10), 3.0, (2, 2), &[("B4", 500.0)]);
    let written = source.write_scene(&march).unwrap();
    assert!(written.join(SCENE_MANIFEST).is_file());
    assert!(written.join("QA60.tif").is_file());
    source.write_scene(&january).unwrap();

    let manifests = source.manifests().unwrap();
    let ids: Vec<_> = manifests.iter().map(|(_, m)| m.id.as_str()).collect();
    assert_eq!(ids, vec!["S2B_20180110", "S2A_20180305"]);

    let scenes = source.query("COPERNICUS/S2", &first_half_2018()).unwrap();
    assert_eq!(scenes.len(), 2);
    let loaded = scenes.iter().find(|s| s.id() == "S2A_20180305").unwrap();
    assert_eq!(loaded.metadata(), march.metadata());
    assert_eq!(loaded.require_band("B4").unwrap(), march.require_band("B4").unwrap());
    assert_eq!(loaded.require_band("QA60").unwrap()[[1, 1]], 2048.0);
    assert!(!loaded.is_prepared());
}

#[test]
fn test_write_scene_rejects_prepared_scene() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    let raw = scene_with(
        "S2A_20180305",
        ts(2018, 3, 5),
        2.0,
        vec![
            ("B4", array![[1234.0, 5000.0]]),
            ("QA60", array![[0.0, CLOUD]]),
        ],
    );
    let prepared = filter_2018().build(vec![raw]).unwrap().into_scenes().remove(0);
    assert!(prepared.is_prepared());

    assert!(matches!(source.write_scene(&prepared), Err(EoError::Imagery(_))));
    assert!(!dir.path().join("S2A_20180305").exists());
}

#[test]
fn test_write_scene_rejects_non_digital_numbers() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    for value in [0.1234, f32::NAN, -1.0, 70_000.0] {
        let scene = uniform_scene("odd", ts(2018, 2, 1), 1.0, (1, 1), &[("B4", value)]);
        assert!(
            matches!(source.write_scene(&scene), Err(EoError::Imagery(_))),
            "{value} accepted"
        );
    }
    assert!(source.manifests().unwrap().is_empty());
}

#[test]
fn test_directory_source_filters_dates() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    source
        .write_scene(&uniform_scene("late", ts(2018, 7, 2), 1.0, (1, 1), &[("B4", 1.0)]))
        .unwrap();
    source
        .write_scene(&uniform_scene("early", ts(2017, 12, 31), 1.0, (1, 1), &[("B4", 1.0)]))
        .unwrap();

    assert!(source
        .query("COPERNICUS/S2", &first_half_2018())
        .unwrap()
        .is_empty());
}

#[test]
fn test_directory_source_ignores_stray_entries() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("not-a-scene")).unwrap();
    std::fs::write(dir.path().join("README.txt"), "notes").unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    let scene = uniform_scene("only", ts(2018, 2, 1), 1.0, (1, 1), &[("B4", 1.0)]);
    let scene_dir = source.write_scene(&scene).unwrap();
    std::fs::write(scene_dir.join("notes.txt"), "ignored").unwrap();

    let scenes = source.query("COPERNICUS/S2", &first_half_2018()).unwrap();
    assert_eq!(scenes.len(), 1);
    let names: Vec<_> = scenes[0].raster().band_names().collect();
    assert_eq!(names, vec!["B4", "QA60"]);
}

#[test]
fn test_directory_source_unknown_collection_is_empty() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    source
        .write_scene(&uniform_scene("s", ts(2018, 2, 1), 1.0, (1, 1), &[("B4", 1.0)]))
        .unwrap();
    assert!(source
        .query("LANDSAT/LC08", &first_half_2018())
        .unwrap()
        .is_empty());
}

#[test]
fn test_directory_source_missing_root() {
    let dir = TempDir::new().unwrap();
    let source = DirectorySource::new(dir.path().join("absent"), "COPERNICUS/S2");
    assert!(matches!(
        source.query("COPERNICUS/S2", &first_half_2018()),
        Err(EoError::Imagery(_))
    ));
}

#[test]
fn test_directory_source_invalid_manifest() {
    let dir = TempDir::new().unwrap();
    let scene_dir = dir.path().join("broken");
    std::fs::create_dir(&scene_dir).unwrap();
    std::fs::write(scene_dir.join(SCENE_MANIFEST), "id = 3").unwrap();
    let source = DirectorySource::new(dir.path(), "COPERNICUS/S2");
    assert!(matches!(source.manifests(), Err(EoError::Imagery(_))));
}

#[test]
fn test_memory_source_query() {
    let source = MemorySource::new().with_collection(
        "COPERNICUS/S2",
        vec![
            uniform_scene("in", ts(2018, 5, 1), 1.0, (1, 1), &[("B4", 1.0)]),
            uniform_scene("out", ts(2019, 5, 1), 1.0, (1, 1), &[("B4", 1.0)]),
        ],
    );
    assert_eq!(source.name(), "memory");
    let scenes = source.query("COPERNICUS/S2", &first_half_2018()).unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].metadata(), &meta("in", ts(2018, 5, 1), 1.0));
    assert!(source.query("other", &first_half_2018()).unwrap().is_empty());
}
