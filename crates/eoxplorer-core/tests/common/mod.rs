#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use ndarray::Array2;

use eoxplorer_core::collection::{CollectionFilter, DateRange};
use eoxplorer_core::scene::{Scene, SceneMetadata};

pub const CLOUD: f32 = (1u32 << 10) as f32;
pub const CIRRUS: f32 = (1u32 << 11) as f32;

pub fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
}

pub fn meta(id: &str, acquired: DateTime<Utc>, cloud_percentage: f32) -> SceneMetadata {
    SceneMetadata {
        id: id.to_string(),
        acquired,
        cloud_percentage,
    }
}

/// A scene with every band uniformly filled and a clear QA band.
pub fn uniform_scene(
    id: &str,
    acquired: DateTime<Utc>,
    cloud_percentage: f32,
    shape: (usize, usize),
    bands: &[(&str, f32)],
) -> Scene {
    let mut all: Vec<(String, Array2<f32>)> = bands
        .iter()
        .map(|(n, v)| (n.to_string(), Array2::from_elem(shape, *v)))
        .collect();
    all.push(("QA60".to_string(), Array2::zeros(shape)));
    Scene::from_bands(meta(id, acquired, cloud_percentage), all).unwrap()
}

pub fn scene_with(
    id: &str,
    acquired: DateTime<Utc>,
    cloud_percentage: f32,
    bands: Vec<(&str, Array2<f32>)>,
) -> Scene {
    Scene::from_bands(meta(id, acquired, cloud_percentage), bands).unwrap()
}

/// The 2018 first-half window with a 20% cloud threshold.
pub fn filter_2018() -> CollectionFilter {
    CollectionFilter::new(DateRange::parse("2018-01-01", "2018-06-30").unwrap())
        .with_cloud_threshold(20.0)
}

/// NaN-aware closeness check, since "no data" never equals itself.
pub fn assert_close(actual: f32, expected: f32) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "expected no data, got {actual}");
    } else {
        approx::assert_abs_diff_eq!(actual, expected, epsilon = 1e-5);
    }
}
