//! Pivoting row-oriented samples into a rectangular grid
//!
//! Distinct x values (ascending) become columns, distinct y values
//! (ascending) become rows. Cells with no matching sample stay `None`.

use super::data::Sample;
use super::error::{Result, SurfaceError};

/// Rectangular grid of z values indexed `z[row][col]` = `z[y][x]`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Distinct x values, ascending (one per column)
    pub x: Vec<f64>,
    /// Distinct y values, ascending (one per row)
    pub y: Vec<f64>,
    /// Cell values; `None` where no sample exists for that (x, y)
    pub z: Vec<Vec<Option<f64>>>,
}

impl Grid {
    /// Pivot the samples of one series into a grid
    ///
    /// Fails with `DuplicateCoordinate` if two samples share the same (x, y),
    /// and with `Validation` if any coordinate is not finite.
    pub fn pivot<'a, I>(series: &str, samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Sample>,
        I::IntoIter: Clone,
    {
        let samples = samples.into_iter();

        for s in samples.clone() {
            if !s.x.is_finite() || !s.y.is_finite() {
                return Err(SurfaceError::Validation(format!(
                    "series '{}' has non-finite coordinate (x={}, y={})",
                    series, s.x, s.y
                )));
            }
        }

        let x = distinct_sorted(samples.clone().map(|s| s.x));
        let y = distinct_sorted(samples.clone().map(|s| s.y));

        let mut z = vec![vec![None; x.len()]; y.len()];
        let mut filled = vec![vec![false; x.len()]; y.len()];

        for s in samples {
            let col = axis_position(&x, s.x);
            let row = axis_position(&y, s.y);

            if filled[row][col] {
                return Err(SurfaceError::DuplicateCoordinate {
                    series: series.to_string(),
                    x: s.x,
                    y: s.y,
                });
            }
            filled[row][col] = true;
            // NaN z leaves the cell missing
            z[row][col] = if s.z.is_nan() { None } else { Some(s.z) };
        }

        Ok(Grid { x, y, z })
    }

    pub fn n_rows(&self) -> usize {
        self.y.len()
    }

    pub fn n_cols(&self) -> usize {
        self.x.len()
    }

    /// True if every cell holds a value
    pub fn is_dense(&self) -> bool {
        self.z.iter().all(|row| row.iter().all(Option::is_some))
    }

    /// Number of cells without a value
    pub fn missing_cells(&self) -> usize {
        self.z
            .iter()
            .map(|row| row.iter().filter(|c| c.is_none()).count())
            .sum()
    }

    /// Dense copy of the cell values, or None if any cell is missing
    pub fn dense_values(&self) -> Option<Vec<Vec<f64>>> {
        self.z
            .iter()
            .map(|row| row.iter().copied().collect::<Option<Vec<f64>>>())
            .collect()
    }
}

/// -0.0 and 0.0 are the same coordinate
fn normalize(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut axis: Vec<f64> = values.map(normalize).collect();
    axis.sort_by(f64::total_cmp);
    axis.dedup();
    axis
}

fn axis_position(axis: &[f64], value: f64) -> usize {
    let value = normalize(value);
    // Every value was inserted into the axis by distinct_sorted
    axis.binary_search_by(|v| v.total_cmp(&value))
        .unwrap_or_else(|pos| pos)
}
