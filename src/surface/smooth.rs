//! Separable Gaussian smoothing with mirror boundaries
//!
//! Each output cell is a weighted average of its neighbours using a Gaussian
//! kernel of standard deviation `sigma`. The kernel radius is
//! `floor(TRUNCATE * sigma + 0.5)`. Out-of-range indices are reflected about
//! the edge with the edge sample repeated (`d c b a | a b c d | d c b a`),
//! and the reflection repeats periodically when the kernel is wider than
//! the grid.
//!
//! The 2D filter is two 1D passes: along x (within each row) first, then
//! along y (within each column).

use super::error::{Result, SurfaceError};
use super::grid::Grid;

/// Kernel half-width in standard deviations
pub const TRUNCATE: f64 = 4.0;

/// Sigmas at or below this are treated as no smoothing; squaring them underflows
pub const MIN_SIGMA: f64 = 1e-15;

/// Normalized Gaussian weights for offsets `-radius..=radius`
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = kernel_radius(sigma);
    if radius == 0 {
        return vec![1.0];
    }
    let scale = -0.5 / (sigma * sigma);

    let mut weights: Vec<f64> = (-(radius as i64)..=radius as i64)
        .map(|x| (scale * (x * x) as f64).exp())
        .collect();

    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

pub fn kernel_radius(sigma: f64) -> usize {
    (TRUNCATE * sigma + 0.5) as usize
}

/// Map a possibly out-of-range index onto `0..len` by mirror reflection
fn reflect_index(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period) as usize;
    if m >= len {
        2 * len - 1 - m
    } else {
        m
    }
}

/// Correlate one line with a symmetric kernel
fn filter_line(line: &[f64], kernel: &[f64], out: &mut [f64]) {
    let len = line.len();
    let radius = kernel.len() / 2;

    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = line[i] * kernel[radius];
        for j in 1..=radius {
            let left = line[reflect_index(i as isize - j as isize, len)];
            let right = line[reflect_index((i + j) as isize, len)];
            acc += (left + right) * kernel[radius + j];
        }
        *slot = acc;
    }
}

/// Gaussian-filter a dense row-major 2D array
///
/// `values` must be rectangular. A sigma of at most `MIN_SIGMA` returns the
/// input unchanged.
pub fn gaussian_filter(values: &[Vec<f64>], sigma: f64) -> Vec<Vec<f64>> {
    if sigma <= MIN_SIGMA || values.is_empty() || values[0].is_empty() {
        return values.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let n_rows = values.len();
    let n_cols = values[0].len();

    // Pass 1: along x
    let mut along_x = vec![vec![0.0; n_cols]; n_rows];
    for (row, out) in values.iter().zip(along_x.iter_mut()) {
        filter_line(row, &kernel, out);
    }

    // Pass 2: along y
    let mut result = vec![vec![0.0; n_cols]; n_rows];
    let mut column = vec![0.0; n_rows];
    let mut filtered = vec![0.0; n_rows];
    for col in 0..n_cols {
        for (row, v) in column.iter_mut().enumerate() {
            *v = along_x[row][col];
        }
        filter_line(&column, &kernel, &mut filtered);
        for (row, v) in filtered.iter().enumerate() {
            result[row][col] = *v;
        }
    }

    result
}

/// Smooth a grid's z values, keeping its axes
///
/// Fails with `Validation` if the grid has missing cells.
pub fn smooth_grid(series: &str, grid: &Grid, sigma: f64) -> Result<Grid> {
    let dense = grid.dense_values().ok_or_else(|| {
        SurfaceError::Validation(format!(
            "series '{}' is not a dense grid ({} of {} cells missing); cannot smooth",
            series,
            grid.missing_cells(),
            grid.n_rows() * grid.n_cols()
        ))
    })?;

    let smoothed = gaussian_filter(&dense, sigma);

    Ok(Grid {
        x: grid.x.clone(),
        y: grid.y.clone(),
        z: smoothed
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    #[test]
    fn test_kernel_radius_and_normalization() {
        assert_eq!(kernel_radius(0.6), 2);
        assert_eq!(kernel_radius(1.0), 4);
        assert_eq!(kernel_radius(0.1), 0);

        let kernel = gaussian_kernel(0.6);
        assert_eq!(kernel.len(), 5);
        assert_close(kernel.iter().sum::<f64>(), 1.0);
        // Symmetric, peak in the middle
        assert_close(kernel[0], kernel[4]);
        assert_close(kernel[1], kernel[3]);
        assert!(kernel[2] > kernel[1] && kernel[1] > kernel[0]);
    }

    #[test]
    fn test_kernel_values_sigma_one() {
        let kernel = gaussian_kernel(1.0);
        let raw: Vec<f64> = (-4..=4).map(|x: i32| (-0.5 * (x * x) as f64).exp()).collect();
        let sum: f64 = raw.iter().sum();
        for (k, r) in kernel.iter().zip(raw.iter()) {
            assert_close(*k, r / sum);
        }
    }

    #[test]
    fn test_reflect_index() {
        // d c b a | a b c d | d c b a
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        // Periodic past one full reflection
        assert_eq!(reflect_index(8, 4), 0);
        assert_eq!(reflect_index(-5, 4), 3);
        // Single element always maps to itself
        assert_eq!(reflect_index(-3, 1), 0);
        assert_eq!(reflect_index(7, 1), 0);
    }

    #[test]
    fn test_filter_line_mirror_edges() {
        let kernel = gaussian_kernel(0.6);
        let line = [1.0, 2.0, 3.0];
        let mut out = [0.0; 3];
        filter_line(&line, &kernel, &mut out);

        // Padded line: 2 1 | 1 2 3 | 3 2
        let padded = [2.0, 1.0, 1.0, 2.0, 3.0, 3.0, 2.0];
        for i in 0..3 {
            let expected: f64 = (0..5).map(|k| padded[i + k] * kernel[k]).sum();
            assert_close(out[i], expected);
        }
    }

    #[test]
    fn test_constant_grid_is_unchanged() {
        let values = vec![vec![7.5; 4]; 3];
        let out = gaussian_filter(&values, 0.8);
        for row in &out {
            for v in row {
                assert_close(*v, 7.5);
            }
        }
    }

    #[test]
    fn test_single_cell_is_unchanged() {
        let out = gaussian_filter(&[vec![3.25]], 1.0);
        assert_close(out[0][0], 3.25);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let values = vec![vec![1.0, 5.0], vec![-2.0, 0.5]];
        assert_eq!(gaussian_filter(&values, 0.0), values);
    }

    #[test]
    fn test_tiny_sigma_is_identity() {
        let values = vec![vec![1.0, 5.0], vec![-2.0, 0.5]];
        assert_eq!(gaussian_filter(&values, 1e-160), values);
        assert_eq!(gaussian_filter(&values, MIN_SIGMA), values);
        assert_eq!(gaussian_kernel(1e-160), vec![1.0]);

        // Just above the cutoff the kernel is still a unit impulse
        let out = gaussian_filter(&values, 1e-10);
        assert!(out.iter().flatten().all(|v| v.is_finite()));
        assert_eq!(out, values);
    }

    #[test]
    fn test_reference_values_sigma_0_6() {
        let kernel = gaussian_kernel(0.6);
        let expected_kernel = [
            0.0025662686485205363,
            0.16552456665899618,
            0.6638183293849667,
            0.16552456665899618,
            0.0025662686485205363,
        ];
        for (k, e) in kernel.iter().zip(expected_kernel.iter()) {
            assert_close(*k, *e);
        }

        // Rows are y, columns are x
        let out = gaussian_filter(&[vec![10.0, 30.0], vec![20.0, 40.0]], 0.6);
        assert_close(out[0][0], 15.119713118681121);
        assert_close(out[0][1], 28.29342896043963);
        assert_close(out[1][0], 21.706571039560373);
        assert_close(out[1][1], 34.88028688131888);

        let out = gaussian_filter(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], 0.6);
        let expected = [
            [1.6851946844726695, 2.5119713118681117, 3.3387479392635546],
            [3.6612520607364463, 4.488028688131889, 5.314805315527331],
        ];
        for (row, exp) in out.iter().zip(expected.iter()) {
            for (v, e) in row.iter().zip(exp.iter()) {
                assert_close(*v, *e);
            }
        }
    }

    #[test]
    fn test_filter_is_separable_product() {
        // Impulse response equals outer product of the 1D responses
        let mut values = vec![vec![0.0; 5]; 5];
        values[2][2] = 1.0;
        let out = gaussian_filter(&values, 0.6);
        let kernel = gaussian_kernel(0.6);
        for r in 0..5 {
            for c in 0..5 {
                assert_close(out[r][c], kernel[r] * kernel[c]);
            }
        }
    }

    #[test]
    fn test_smooth_grid_rejects_sparse() {
        let grid = Grid {
            x: vec![1.0, 2.0],
            y: vec![1.0],
            z: vec![vec![Some(1.0), None]],
        };
        match smooth_grid("A", &grid, 0.5) {
            Err(SurfaceError::Validation(msg)) => assert!(msg.contains("1 of 2")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_grid_keeps_axes() {
        let grid = Grid {
            x: vec![1.0, 2.0, 3.0],
            y: vec![10.0, 20.0],
            z: vec![
                vec![Some(1.0), Some(2.0), Some(3.0)],
                vec![Some(4.0), Some(5.0), Some(6.0)],
            ],
        };
        let smoothed = smooth_grid("A", &grid, 0.6).unwrap();
        assert_eq!(smoothed.x, grid.x);
        assert_eq!(smoothed.y, grid.y);
        assert!(smoothed.is_dense());
        assert_ne!(smoothed.z, grid.z);
    }
}
