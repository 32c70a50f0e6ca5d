use thiserror::Error;

/// Errors that can occur while loading samples, building surfaces or rendering them
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Out-of-range smoothing factor, empty input, empty palette
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// More than one sample shares the same (x, y) within a series
    #[error("Duplicate coordinate (x={x}, y={y}) in series '{series}'")]
    DuplicateCoordinate { series: String, x: f64, y: f64 },

    /// Malformed input: sparse grid under smoothing, non-finite coordinates, null cells
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required column absent from the input table
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// CSV parsing or column casting error
    #[error("Data error: {0}")]
    Data(#[from] polars::prelude::PolarsError),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file or figure serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (bad colors, invalid layout values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Results using SurfaceError
pub type Result<T> = std::result::Result<T, SurfaceError>;
