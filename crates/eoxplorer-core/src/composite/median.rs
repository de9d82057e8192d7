use ndarray::Array2;

use crate::raster::{is_no_data, NO_DATA};

use super::fill_rows;

/// Per-pixel median over the valid values of `stack`.
///
/// Uses `select_nth_unstable` for O(n) median without full sort.
pub fn median_band(stack: &[&Array2<f32>], shape: (usize, usize)) -> Array2<f32> {
    fill_rows(shape, |row, mut line| {
        let mut values = Vec::with_capacity(stack.len());
        for (col, out) in line.iter_mut().enumerate() {
            values.clear();
            values.extend(
                stack
                    .iter()
                    .map(|band| band[[row, col]])
                    .filter(|v| !is_no_data(*v)),
            );
            *out = median_of(&mut values);
        }
    })
}

/// Median of `values`, reordering them. Empty input yields [`NO_DATA`].
pub fn median_of(values: &mut [f32]) -> f32 {
    let n = values.len();
    if n == 0 {
        NO_DATA
    } else if n == 1 {
        values[0]
    } else if n % 2 == 1 {
        let mid = n / 2;
        *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
    } else {
        let mid = n / 2;
        values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        values[..mid].select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b));
        (values[mid - 1] + values[mid]) / 2.0
    }
}
