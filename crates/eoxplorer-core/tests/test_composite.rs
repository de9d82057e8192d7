mod common;

use ndarray::Array2;

use eoxplorer_core::composite::{
    median_composite, median_of, mosaic_composite, CompositeMethod, TemporalCompositor,
};
use eoxplorer_core::error::EoError;
use eoxplorer_core::raster::{is_no_data, NO_DATA};
use eoxplorer_core::scene::{Scene, SceneCollection};

use common::{assert_close, scene_with, ts, uniform_scene};

fn single_pixel_scene(id: &str, day: u32, value: f32) -> Scene {
    scene_with(
        id,
        ts(2018, 3, day),
        1.0,
        vec![
            ("B4", Array2::from_elem((1, 1), value)),
            ("QA60", Array2::zeros((1, 1))),
        ],
    )
}

// ---------------------------------------------------------------------------
// median_of
// ---------------------------------------------------------------------------

#[test]
fn test_median_of_odd_and_even() {
    assert_close(median_of(&mut [0.9, 0.1, 0.5]), 0.5);
    assert_close(median_of(&mut [0.1, 0.9, 0.3, 0.7]), 0.5);
    assert_close(median_of(&mut [0.4]), 0.4);
    assert!(is_no_data(median_of(&mut [])));
}

// ---------------------------------------------------------------------------
// Median reduction
// ---------------------------------------------------------------------------

#[test]
fn test_median_ignores_no_data() {
    let collection = SceneCollection::new(vec![
        single_pixel_scene("a", 1, NO_DATA),
        single_pixel_scene("b", 2, 0.2),
        single_pixel_scene("c", 3, 0.4),
        single_pixel_scene("d", 4, 0.9),
    ]);
    let composite = median_composite(&collection).unwrap();
    assert_close(composite.band("B4").unwrap()[[0, 0]], 0.4);
}

#[test]
fn test_median_all_no_data_pixel() {
    let collection = SceneCollection::new(vec![
        single_pixel_scene("a", 1, NO_DATA),
        single_pixel_scene("b", 2, NO_DATA),
    ]);
    let composite = median_composite(&collection).unwrap();
    assert!(is_no_data(composite.band("B4").unwrap()[[0, 0]]));
}

#[test]
fn test_median_is_order_independent() {
    let values = [0.7, NO_DATA, 0.1, 0.3, 0.25];
    let scenes: Vec<Scene> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| single_pixel_scene(&format!("s{i}"), i as u32 + 1, v))
        .collect();

    let forward = median_composite(&SceneCollection::new(scenes.clone())).unwrap();
    let mut reversed_scenes = scenes.clone();
    reversed_scenes.reverse();
    let reversed = median_composite(&SceneCollection::new(reversed_scenes)).unwrap();
    let mut rotated_scenes = scenes;
    rotated_scenes.rotate_left(2);
    let rotated = median_composite(&SceneCollection::new(rotated_scenes)).unwrap();

    let f = forward.band("B4").unwrap()[[0, 0]];
    assert_close(f, 0.275);
    assert_close(reversed.band("B4").unwrap()[[0, 0]], f);
    assert_close(rotated.band("B4").unwrap()[[0, 0]], f);
}

#[test]
fn test_median_large_raster_parallel() {
    // 512×512 = 262144 > 65536, uses parallel path
    let collection = SceneCollection::new(vec![
        uniform_scene("a", ts(2018, 2, 1), 1.0, (512, 512), &[("B4", 0.3)]),
        uniform_scene("b", ts(2018, 2, 2), 1.0, (512, 512), &[("B4", 0.5)]),
        uniform_scene("c", ts(2018, 2, 3), 1.0, (512, 512), &[("B4", 0.7)]),
    ]);
    let composite = median_composite(&collection).unwrap();
    for v in composite.band("B4").unwrap().iter() {
        assert!((*v - 0.5).abs() < 1e-5);
    }
}

// ---------------------------------------------------------------------------
// Mosaic reduction
// ---------------------------------------------------------------------------

#[test]
fn test_mosaic_first_valid_wins() {
    let collection = SceneCollection::new(vec![
        single_pixel_scene("s1", 1, NO_DATA),
        single_pixel_scene("s2", 2, 5.0),
        single_pixel_scene("s3", 3, 7.0),
    ]);
    let composite = mosaic_composite(&collection).unwrap();
    assert_close(composite.band("B4").unwrap()[[0, 0]], 5.0);
}

#[test]
fn test_mosaic_is_order_dependent() {
    let collection = SceneCollection::new(vec![
        single_pixel_scene("s3", 3, 7.0),
        single_pixel_scene("s1", 1, NO_DATA),
        single_pixel_scene("s2", 2, 5.0),
    ]);
    let composite = mosaic_composite(&collection).unwrap();
    assert_close(composite.band("B4").unwrap()[[0, 0]], 7.0);
}

#[test]
fn test_mosaic_per_pixel_fill() {
    let a = Array2::from_shape_vec((1, 3), vec![1.0, NO_DATA, NO_DATA]).unwrap();
    let b = Array2::from_shape_vec((1, 3), vec![2.0, 3.0, NO_DATA]).unwrap();
    let collection = SceneCollection::new(vec![
        scene_with("a", ts(2018, 2, 1), 1.0, vec![("B4", a)]),
        scene_with("b", ts(2018, 2, 2), 2.0, vec![("B4", b)]),
    ]);
    let composite = TemporalCompositor::excluding(Vec::<String>::new())
        .mosaic(&collection)
        .unwrap();
    let band = composite.band("B4").unwrap();
    assert_close(band[[0, 0]], 1.0);
    assert_close(band[[0, 1]], 3.0);
    assert!(is_no_data(band[[0, 2]]));
}

// ---------------------------------------------------------------------------
// Empty collections, bands, shapes
// ---------------------------------------------------------------------------

#[test]
fn test_empty_collection_is_all_no_data() {
    let empty = SceneCollection::empty();
    let median = median_composite(&empty).unwrap();
    let mosaic = mosaic_composite(&empty).unwrap();
    assert!(median.is_all_no_data());
    assert!(mosaic.is_all_no_data());
    assert!(median.is_empty());
}

#[test]
fn test_empty_collection_with_shape() {
    let raster = TemporalCompositor::new()
        .composite_with_shape(
            &SceneCollection::empty(),
            CompositeMethod::Median,
            (3, 4),
            &["B4", "B8"],
        )
        .unwrap();
    assert_eq!(raster.shape(), (3, 4));
    assert_eq!(raster.band_names().collect::<Vec<_>>(), vec!["B4", "B8"]);
    assert!(raster.is_all_no_data());
}

#[test]
fn test_qa_band_excluded_and_common_bands_only() {
    let collection = SceneCollection::new(vec![
        uniform_scene("a", ts(2018, 2, 1), 1.0, (2, 2), &[("B4", 0.1), ("B8", 0.2)]),
        uniform_scene("b", ts(2018, 2, 2), 1.0, (2, 2), &[("B4", 0.3)]),
    ]);
    let composite = median_composite(&collection).unwrap();
    assert_eq!(composite.band_names().collect::<Vec<_>>(), vec!["B4"]);
}

#[test]
fn test_shape_mismatch_is_an_error() {
    let collection = SceneCollection::new(vec![
        uniform_scene("a", ts(2018, 2, 1), 1.0, (2, 2), &[("B4", 0.1)]),
        uniform_scene("b", ts(2018, 2, 2), 1.0, (3, 2), &[("B4", 0.3)]),
    ]);
    assert!(matches!(
        median_composite(&collection),
        Err(EoError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_composite_method_display() {
    assert_eq!(format!("{}", CompositeMethod::Median), "Median");
    assert_eq!(format!("{}", CompositeMethod::Mosaic), "Mosaic");
    assert_eq!(CompositeMethod::default(), CompositeMethod::Median);
}
