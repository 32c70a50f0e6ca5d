//! Plot configuration
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is valid. Command-line flags override file values
//! in `main.rs`.
//!
//! ```json
//! {
//!   "smooth_factor": 0.6,
//!   "use_color_scales": false,
//!   "separator": ";",
//!   "plotly_js_file": "vendor/plotly.min.js",
//!   "layout": { "title": "My 3D Surface Plot", "aspect_ratio": [4, 3, 2] },
//!   "palettes": { "color_scales": ["Viridis"], "flat_colors": ["#1f77b4"] }
//! }
//! ```

use crate::surface::{PaletteSet, Result, SurfaceBuilder, SurfaceError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Plotly bundle referenced by generated HTML
pub const DEFAULT_PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Gaussian smoothing sigma in grid cells, in [0, 1]. 0 disables smoothing.
    pub smooth_factor: f64,

    /// Named continuous color scales instead of flat per-series colors
    pub use_color_scales: bool,

    /// Input field separator (single ASCII character)
    pub separator: char,

    /// Output file name
    pub output: String,

    /// Where the HTML loads plotly.js from
    pub plotly_js: String,

    /// Local plotly.js bundle to inline into the HTML instead of `plotly_js`
    pub plotly_js_file: Option<PathBuf>,

    pub layout: LayoutConfig,

    /// Replacement palettes; None = embedded palettes.json
    pub palettes: Option<PaletteSet>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            smooth_factor: 0.0,
            use_color_scales: false,
            separator: ';',
            output: "surface_plot.html".to_string(),
            plotly_js: DEFAULT_PLOTLY_JS.to_string(),
            plotly_js_file: None,
            layout: LayoutConfig::default(),
            palettes: None,
        }
    }
}

/// Scene and figure-level layout
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub z_axis_title: String,
    pub legend_title: String,
    /// Scene aspect ratio (x, y, z)
    pub aspect_ratio: [f64; 3],
    /// Camera eye position (x, y, z)
    pub camera_eye: [f64; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            title: "My 3D Surface Plot".to_string(),
            x_axis_title: "X Axis Title".to_string(),
            y_axis_title: "Y Axis Title".to_string(),
            z_axis_title: "Z Axis Title".to_string(),
            legend_title: "Data Series".to_string(),
            aspect_ratio: [4.0, 3.0, 2.0],
            camera_eye: [10.0, 5.0, 2.0],
        }
    }
}

impl PlotConfig {
    /// Load from a JSON file and validate
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.smooth_factor) {
            return Err(SurfaceError::InvalidParameter(format!(
                "smooth_factor must be in [0, 1], got {}",
                self.smooth_factor
            )));
        }

        if !self.separator.is_ascii() {
            return Err(SurfaceError::Config(format!(
                "separator must be a single ASCII character, got '{}'",
                self.separator
            )));
        }

        if self.layout.aspect_ratio.iter().any(|v| !(*v > 0.0)) {
            return Err(SurfaceError::Config(format!(
                "aspect_ratio values must be positive, got {:?}",
                self.layout.aspect_ratio
            )));
        }

        if let Some(ref palettes) = self.palettes {
            palettes.validate()?;
        }

        Ok(())
    }

    pub fn separator_byte(&self) -> u8 {
        self.separator as u8
    }

    /// Surface builder carrying this config's smoothing, color mode and palettes
    pub fn surface_builder(&self) -> SurfaceBuilder {
        let builder = SurfaceBuilder::new()
            .smooth_factor(self.smooth_factor)
            .use_color_scales(self.use_color_scales);
        match self.palettes {
            Some(ref palettes) => builder.palettes(palettes.clone()),
            None => builder,
        }
    }
}
