//! Sample records and the delimited-text loader
//!
//! Input tables need a header with at least `series`, `x`, `y` and `z`
//! columns. Any other columns are ignored.

use super::error::{Result, SurfaceError};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Required input columns, in the order they are read
pub const REQUIRED_COLUMNS: [&str; 4] = ["series", "x", "y", "z"];

/// One labeled (x, y, z) observation
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub series: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(series: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Sample {
            series: series.into(),
            x,
            y,
            z,
        }
    }
}

/// Load samples from a delimited text file
pub fn load_samples(path: &Path, separator: u8) -> Result<Vec<Sample>> {
    if !path.is_file() {
        return Err(SurfaceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("CSV file '{}' not found", path.display()),
        )));
    }

    let df = csv_options(separator)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    samples_from_dataframe(&df)
}

/// Load samples from in-memory delimited text
pub fn samples_from_csv_bytes(bytes: &[u8], separator: u8) -> Result<Vec<Sample>> {
    let df = csv_options(separator)
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    samples_from_dataframe(&df)
}

fn csv_options(separator: u8) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
}

/// Extract samples from a DataFrame with `series`, `x`, `y`, `z` columns
///
/// `series` is cast to string so numeric labels work; coordinates are cast
/// to f64. A null in any required column is a validation error.
pub fn samples_from_dataframe(df: &DataFrame) -> Result<Vec<Sample>> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            return Err(SurfaceError::MissingColumn(required.to_string()));
        }
    }

    let series_col = df
        .column("series")?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let x_col = float_column(df, "x")?;
    let y_col = float_column(df, "y")?;
    let z_col = float_column(df, "z")?;

    let labels = series_col.str()?;
    let xs = x_col.f64()?;
    let ys = y_col.f64()?;
    let zs = z_col.f64()?;

    let mut samples = Vec::with_capacity(df.height());
    for (row, (((label, x), y), z)) in labels
        .into_iter()
        .zip(xs.into_iter())
        .zip(ys.into_iter())
        .zip(zs.into_iter())
        .enumerate()
    {
        match (label, x, y, z) {
            (Some(label), Some(x), Some(y), Some(z)) => {
                samples.push(Sample::new(label, x, y, z));
            }
            _ => {
                return Err(SurfaceError::Validation(format!(
                    "row {} has a missing value in one of {:?}",
                    row + 1,
                    REQUIRED_COLUMNS
                )));
            }
        }
    }

    Ok(samples)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Series> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?)
}

/// Summary statistics over all samples
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub total_rows: usize,
    pub n_series: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl DataSummary {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut labels: Vec<&str> = samples.iter().map(|s| s.series.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();

        let (x_min, x_max) = min_max(samples.iter().map(|s| s.x));
        let (y_min, y_max) = min_max(samples.iter().map(|s| s.y));
        let (z_min, z_max) = min_max(samples.iter().map(|s| s.z));

        DataSummary {
            total_rows: samples.len(),
            n_series: labels.len(),
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }
}

/// NaN values are skipped
fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

impl std::fmt::Display for DataSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DataSummary {{ rows: {}, series: {}, x: [{:.2}, {:.2}], y: [{:.2}, {:.2}], z: [{:.2}, {:.2}] }}",
            self.total_rows,
            self.n_series,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max,
            self.z_min,
            self.z_max
        )
    }
}
