//! Plot generation pipeline
//!
//! The pipeline:
//! 1. Loads samples from the input table
//! 2. Builds one surface per series (pivot, smoothing, colors)
//! 3. Assembles the Plotly figure and renders it to HTML
//! 4. Returns the result for the caller to save

use crate::config::PlotConfig;
use crate::plotly::{html, Figure, PlotlyJs};
use crate::surface::{load_samples, DataSummary, Result, Sample};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A rendered plot ready to be written out
#[derive(Debug, Clone)]
pub struct PlotResult {
    pub filename: String,
    pub html: String,
    pub n_surfaces: usize,
    pub summary: DataSummary,
}

/// Load `input` and render it according to `config`
pub fn generate_plot(input: &Path, config: &PlotConfig) -> Result<PlotResult> {
    config.validate()?;

    info!("[1/3] Loading samples from {}", input.display());
    let samples = load_samples(input, config.separator_byte())?;

    render_samples(&samples, config)
}

/// Render already-loaded samples
pub fn render_samples(samples: &[Sample], config: &PlotConfig) -> Result<PlotResult> {
    let summary = DataSummary::from_samples(samples);
    debug!("{}", summary);

    info!(
        "[2/3] Building {} surface(s) (smooth factor: {}, color scales: {})",
        summary.n_series, config.smooth_factor, config.use_color_scales
    );
    let surfaces = config.surface_builder().build(samples)?;

    info!("[3/3] Rendering figure");
    let figure = Figure::from_surfaces(&surfaces, &summary, &config.layout);
    let inline_source = match config.plotly_js_file {
        Some(ref path) => {
            debug!("Inlining plotly.js from {}", path.display());
            Some(std::fs::read_to_string(path)?)
        }
        None => None,
    };
    let plotly_js = match inline_source {
        Some(ref source) => PlotlyJs::Inline(source),
        None => PlotlyJs::Src(&config.plotly_js),
    };
    let html = html::to_string(&figure, &config.layout.title, plotly_js)?;

    Ok(PlotResult {
        filename: config.output.clone(),
        html,
        n_surfaces: surfaces.len(),
        summary,
    })
}

/// Write the HTML under `dir` (the current directory if None), returning the path
pub fn save_plot(plot: &PlotResult, dir: Option<&Path>) -> Result<PathBuf> {
    let path = match dir {
        Some(dir) => dir.join(&plot.filename),
        None => PathBuf::from(&plot.filename),
    };
    std::fs::write(&path, &plot.html)?;
    info!("Saved {} ({} bytes)", path.display(), plot.html.len());
    Ok(path)
}
