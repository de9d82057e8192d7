use ndarray::Array2;

use crate::raster::{is_no_data, NO_DATA};

use super::fill_rows;

/// Per pixel, the first valid value in `stack` order.
pub fn mosaic_band(stack: &[&Array2<f32>], shape: (usize, usize)) -> Array2<f32> {
    fill_rows(shape, |row, mut line| {
        for (col, out) in line.iter_mut().enumerate() {
            *out = stack
                .iter()
                .map(|band| band[[row, col]])
                .find(|v| !is_no_data(*v))
                .unwrap_or(NO_DATA);
        }
    })
}
