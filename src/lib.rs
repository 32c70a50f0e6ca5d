//! Surface Plot Operator Library
//!
//! Core modules for rendering multi-series 3D surface plots from tabular
//! samples. Used by the `surface_plot_operator` binary.

pub mod config;
pub mod pipeline;
pub mod plotly;
pub mod surface;
