//! Color encodings for surfaces
//!
//! A surface is tinted either by a named continuous color scale or by an
//! explicit list of color stops. A flat (non-gradient) surface is expressed
//! as two stops carrying the same color at positions 0.0 and 1.0, which keeps
//! renderers that only accept continuous scales happy.

/// Color mapping for one surface
#[derive(Debug, Clone, PartialEq)]
pub enum ColorEncoding {
    /// Named continuous color scale (e.g. "Viridis")
    Named(String),
    /// Explicit color stops, sorted by position
    Stops(Vec<ColorStop>),
}

/// A single color stop in a scale
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Normalized scale position in [0, 1]
    pub position: f64,
    /// Hex color at this stop
    pub color: String,
}

impl ColorEncoding {
    /// Uniform tint: both scale endpoints map to `color`
    pub fn flat(color: impl Into<String>) -> Self {
        let color = color.into();
        ColorEncoding::Stops(vec![
            ColorStop {
                position: 0.0,
                color: color.clone(),
            },
            ColorStop {
                position: 1.0,
                color,
            },
        ])
    }

    pub fn named(scale: impl Into<String>) -> Self {
        ColorEncoding::Named(scale.into())
    }

    /// Color at an exact stop position, if this is a stop-based encoding
    pub fn color_at(&self, position: f64) -> Option<&str> {
        match self {
            ColorEncoding::Named(_) => None,
            ColorEncoding::Stops(stops) => stops
                .iter()
                .find(|s| s.position == position)
                .map(|s| s.color.as_str()),
        }
    }
}
