//! Surface building
//!
//! Turns flat `(series, x, y, z)` samples into one renderable surface per
//! series.
//!
//! Structure:
//! - `data.rs`: Sample records, CSV loader, summary statistics
//! - `grid.rs`: Pivot of one series into a rectangular grid
//! - `smooth.rs`: Separable Gaussian filter with mirror boundaries
//! - `palettes.rs`: Palette set (embedded palettes.json)
//! - `colors.rs`: Color encodings (named scale or flat two-stop scale)
//! - `builder.rs`: SurfaceBuilder and SurfaceSpec
//! - `error.rs`: Error types

pub mod builder;
pub mod colors;
pub mod data;
pub mod error;
pub mod grid;
pub mod palettes;
pub mod smooth;

// Re-exports for convenience
pub use builder::{
    build_surfaces, ContourAxis, Contours, LightPosition, Lighting, SurfaceBuilder, SurfaceSpec,
};
pub use colors::{ColorEncoding, ColorStop};
pub use data::{load_samples, samples_from_csv_bytes, DataSummary, Sample};
pub use error::{Result, SurfaceError};
pub use grid::Grid;
pub use palettes::PaletteSet;
