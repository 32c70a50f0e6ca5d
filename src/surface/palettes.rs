//! Palette set for per-series color assignment
//!
//! Loads the default palettes from palettes.json (embedded at compile time).
//! Two parallel palettes exist:
//! - `color_scales`: named continuous color scales (e.g. "Viridis"), used when
//!   the caller asks for gradient surfaces
//! - `flat_colors`: hex RGB colors, used to build a uniform two-stop scale
//!
//! Series are assigned palette entries by discovery index, wrapping around
//! once the palette is exhausted.

use super::error::{Result, SurfaceError};
use once_cell::sync::Lazy;
use serde::Deserialize;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Default palette set, initialized lazily on first access
pub static DEFAULT_PALETTES: Lazy<PaletteSet> = Lazy::new(|| {
    PaletteSet::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        tracing::error!("Failed to load embedded palettes.json: {}", e);
        PaletteSet::builtin()
    })
});

/// Ordered palettes passed explicitly to the surface builder
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaletteSet {
    /// Named continuous color scales
    pub color_scales: Vec<String>,
    /// Flat colors as `#RRGGBB`
    pub flat_colors: Vec<String>,
}

impl Default for PaletteSet {
    fn default() -> Self {
        DEFAULT_PALETTES.clone()
    }
}

impl PaletteSet {
    /// Parse and validate a palette set from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let set: PaletteSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Hardcoded copy of palettes.json, only used if the embedded file is unreadable
    fn builtin() -> Self {
        Self {
            color_scales: ["Viridis", "Cividis", "Inferno", "Magma", "Plasma", "Turbo"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            flat_colors: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Both palettes must be non-empty and every flat color must be valid hex
    pub fn validate(&self) -> Result<()> {
        if self.color_scales.is_empty() {
            return Err(SurfaceError::InvalidParameter(
                "color scale palette is empty".to_string(),
            ));
        }
        if self.flat_colors.is_empty() {
            return Err(SurfaceError::InvalidParameter(
                "flat color palette is empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .flat_colors
            .iter()
            .find(|c| parse_hex_color(c).is_none())
        {
            return Err(SurfaceError::Config(format!(
                "invalid flat color '{}' (expected #RRGGBB)",
                bad
            )));
        }
        Ok(())
    }

    /// Color scale for the series at `index` (wraps around)
    pub fn color_scale(&self, index: usize) -> &str {
        &self.color_scales[index % self.color_scales.len()]
    }

    /// Flat color for the series at `index` (wraps around)
    pub fn flat_color(&self, index: usize) -> &str {
        &self.flat_colors[index % self.flat_colors.len()]
    }
}

/// Parse a hex color string to RGB array
///
/// Supports formats:
/// - `#RRGGBB` (6 hex digits)
/// - `#RRGGBBAA` (8 hex digits, alpha ignored)
/// - `RRGGBB` / `RRGGBBAA` (without #)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}
