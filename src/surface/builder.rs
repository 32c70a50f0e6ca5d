//! Surface builder: samples -> one renderable SurfaceSpec per series
//!
//! Per distinct series label, in first-seen order:
//! 1. Partition the samples by label
//! 2. Pivot into a Grid (x → columns, y → rows)
//! 3. Gaussian-smooth the grid if a smoothing factor is set
//! 4. Assign a color encoding by series index (wrapping over the palette)

use super::colors::ColorEncoding;
use super::data::Sample;
use super::error::{Result, SurfaceError};
use super::grid::Grid;
use super::palettes::PaletteSet;
use super::smooth::{smooth_grid, MIN_SIGMA};
use std::collections::HashMap;
use tracing::debug;

/// Contour line settings for one axis
#[derive(Debug, Clone, PartialEq)]
pub struct ContourAxis {
    pub show: bool,
    pub color: String,
    pub width: f64,
    pub highlight_width: f64,
    pub highlight_color: String,
    /// Project the contour lines onto the wall of their own axis
    pub project: bool,
}

impl Default for ContourAxis {
    fn default() -> Self {
        ContourAxis {
            show: true,
            color: "black".to_string(),
            width: 1.0,
            highlight_width: 1.0,
            highlight_color: "black".to_string(),
            project: true,
        }
    }
}

/// Contour lines on all three axes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contours {
    pub x: ContourAxis,
    pub y: ContourAxis,
    pub z: ContourAxis,
}

/// Surface lighting coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub roughness: f64,
    pub fresnel: f64,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            ambient: 0.5,
            diffuse: 0.7,
            specular: 0.4,
            roughness: 0.7,
            fresnel: 0.2,
        }
    }
}

/// Light source position in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for LightPosition {
    fn default() -> Self {
        LightPosition {
            x: 1000.0,
            y: 1000.0,
            z: 5000.0,
        }
    }
}

/// Rendering-ready description of one series
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    /// Display name (the series label)
    pub name: String,
    pub grid: Grid,
    pub color: ColorEncoding,
    pub contours: Contours,
    pub lighting: Lighting,
    pub light_position: LightPosition,
    pub opacity: f64,
    pub show_legend: bool,
    /// Per-surface color bar
    pub show_scale: bool,
    pub hover_template: String,
}

impl SurfaceSpec {
    /// Wrap a grid with the fixed cosmetic attributes
    pub fn new(name: impl Into<String>, grid: Grid, color: ColorEncoding) -> Self {
        let name = name.into();
        let hover_template = format!(
            "Series: {}<br>X-Value: %{{x}}<br>Y-Value: %{{y}}<br>Z-Value: %{{z}}<extra></extra>",
            name
        );
        SurfaceSpec {
            name,
            grid,
            color,
            contours: Contours::default(),
            lighting: Lighting::default(),
            light_position: LightPosition::default(),
            opacity: 1.0,
            show_legend: true,
            show_scale: false,
            hover_template,
        }
    }
}

/// Builds surfaces from samples with explicit palette configuration
///
/// ```ignore
/// let surfaces = SurfaceBuilder::new()
///     .smooth_factor(0.6)
///     .use_color_scales(true)
///     .build(&samples)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurfaceBuilder {
    smooth_factor: f64,
    use_color_scales: bool,
    palettes: PaletteSet,
}

impl SurfaceBuilder {
    /// No smoothing, flat colors, default palettes
    pub fn new() -> Self {
        Self::default()
    }

    /// Gaussian standard deviation in grid cells, must be in [0, 1]
    pub fn smooth_factor(mut self, smooth_factor: f64) -> Self {
        self.smooth_factor = smooth_factor;
        self
    }

    pub fn use_color_scales(mut self, use_color_scales: bool) -> Self {
        self.use_color_scales = use_color_scales;
        self
    }

    pub fn palettes(mut self, palettes: PaletteSet) -> Self {
        self.palettes = palettes;
        self
    }

    /// Build one SurfaceSpec per series, in first-seen order of series labels
    pub fn build(&self, samples: &[Sample]) -> Result<Vec<SurfaceSpec>> {
        if !(0.0..=1.0).contains(&self.smooth_factor) {
            return Err(SurfaceError::InvalidParameter(format!(
                "smooth factor must be in [0, 1], got {}",
                self.smooth_factor
            )));
        }
        self.palettes.validate()?;

        if samples.is_empty() {
            return Err(SurfaceError::InvalidParameter(
                "no samples: the series set is empty".to_string(),
            ));
        }

        let partitions = partition_by_series(samples);
        debug!(
            "Partitioned {} samples into {} series",
            samples.len(),
            partitions.len()
        );

        let mut surfaces = Vec::with_capacity(partitions.len());
        for (index, (label, members)) in partitions.iter().enumerate() {
            let mut grid = Grid::pivot(label, members.iter().copied())?;

            if self.smooth_factor > MIN_SIGMA {
                grid = smooth_grid(label, &grid, self.smooth_factor)?;
            }

            let color = if self.use_color_scales {
                ColorEncoding::named(self.palettes.color_scale(index))
            } else {
                ColorEncoding::flat(self.palettes.flat_color(index))
            };

            debug!(
                "Series '{}': {}x{} grid, color {:?}",
                label,
                grid.n_rows(),
                grid.n_cols(),
                color
            );

            surfaces.push(SurfaceSpec::new(*label, grid, color));
        }

        Ok(surfaces)
    }
}

/// Build surfaces with the default palettes
pub fn build_surfaces(
    samples: &[Sample],
    smooth_factor: f64,
    use_color_scales: bool,
) -> Result<Vec<SurfaceSpec>> {
    SurfaceBuilder::new()
        .smooth_factor(smooth_factor)
        .use_color_scales(use_color_scales)
        .build(samples)
}

/// Group samples by series label, preserving first-seen label order
fn partition_by_series(samples: &[Sample]) -> Vec<(&str, Vec<&Sample>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut partitions: Vec<(&str, Vec<&Sample>)> = Vec::new();

    for sample in samples {
        let label = sample.series.as_str();
        let slot = *index.entry(label).or_insert_with(|| {
            partitions.push((label, Vec::new()));
            partitions.len() - 1
        });
        partitions[slot].1.push(sample);
    }

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(series: &str) -> Vec<Sample> {
        vec![
            Sample::new(series, 1.0, 1.0, 10.0),
            Sample::new(series, 1.0, 2.0, 20.0),
            Sample::new(series, 2.0, 1.0, 30.0),
            Sample::new(series, 2.0, 2.0, 40.0),
        ]
    }

    #[test]
    fn test_end_to_end_single_series() {
        let surfaces = build_surfaces(&square("A"), 0.0, false).unwrap();

        assert_eq!(surfaces.len(), 1);
        let s = &surfaces[0];
        assert_eq!(s.name, "A");
        assert_eq!(s.grid.x, vec![1.0, 2.0]);
        assert_eq!(s.grid.y, vec![1.0, 2.0]);
        assert_eq!(
            s.grid.z,
            vec![
                vec![Some(10.0), Some(30.0)],
                vec![Some(20.0), Some(40.0)]
            ]
        );
        assert_eq!(s.color, ColorEncoding::flat("#1f77b4"));
        assert_eq!(s.opacity, 1.0);
        assert!(s.show_legend);
        assert!(!s.show_scale);
        assert!(s.contours.x.show && s.contours.y.show && s.contours.z.show);
        assert!(s.hover_template.starts_with("Series: A<br>"));
    }

    #[test]
    fn test_no_smoothing_is_identity() {
        let samples = square("A");
        let pivoted = Grid::pivot("A", &samples).unwrap();
        let surfaces = build_surfaces(&samples, 0.0, false).unwrap();
        assert_eq!(surfaces[0].grid, pivoted);
    }

    #[test]
    fn test_tiny_smooth_factor_is_identity() {
        let surfaces = build_surfaces(&square("A"), 1e-160, false).unwrap();
        assert_eq!(
            surfaces[0].grid.z,
            vec![
                vec![Some(10.0), Some(30.0)],
                vec![Some(20.0), Some(40.0)]
            ]
        );

        // Below the cutoff smoothing is skipped, so sparse input is accepted
        let sparse = vec![
            Sample::new("A", 1.0, 1.0, 1.0),
            Sample::new("A", 2.0, 2.0, 2.0),
        ];
        let surfaces = build_surfaces(&sparse, 1e-160, false).unwrap();
        assert_eq!(surfaces[0].grid.missing_cells(), 2);
    }

    #[test]
    fn test_smoothing_changes_values_but_not_shape() {
        let samples = square("A");
        let surfaces = build_surfaces(&samples, 0.6, false).unwrap();
        let grid = &surfaces[0].grid;

        assert_eq!(grid.n_rows(), 2);
        assert_eq!(grid.n_cols(), 2);
        assert!(grid.is_dense());
        assert_ne!(grid.z[0][0], Some(10.0));
        // Mirror padding keeps the mean of a 2x2 grid
        let total: f64 = grid.z.iter().flatten().map(|v| v.unwrap()).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_discovery_order_and_color_wraparound() {
        let labels = ["h", "b", "g", "a", "f", "c", "e", "d"];
        let samples: Vec<Sample> = labels
            .iter()
            .map(|l| Sample::new(*l, 0.0, 0.0, 1.0))
            .collect();

        let flat = build_surfaces(&samples, 0.0, false).unwrap();
        let names: Vec<&str> = flat.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, labels);
        assert_eq!(flat[6].color, flat[0].color);
        assert_eq!(flat[7].color, flat[1].color);
        assert_ne!(flat[0].color, flat[1].color);

        let scaled = build_surfaces(&samples, 0.0, true).unwrap();
        assert_eq!(scaled[0].color, ColorEncoding::named("Viridis"));
        assert_eq!(scaled[5].color, ColorEncoding::named("Turbo"));
        assert_eq!(scaled[6].color, scaled[0].color);
        assert_eq!(scaled[7].color, scaled[1].color);
    }

    #[test]
    fn test_flat_colors_have_identical_endpoints() {
        let mut samples = square("A");
        samples.extend(square("B"));
        samples.extend(square("C"));

        for s in build_surfaces(&samples, 0.3, false).unwrap() {
            assert!(s.color.color_at(0.0).is_some());
            assert_eq!(s.color.color_at(0.0), s.color.color_at(1.0));
        }
    }

    #[test]
    fn test_interleaved_series_are_partitioned() {
        let samples = vec![
            Sample::new("B", 1.0, 1.0, 1.0),
            Sample::new("A", 5.0, 5.0, 2.0),
            Sample::new("B", 2.0, 1.0, 3.0),
        ];
        let surfaces = build_surfaces(&samples, 0.0, false).unwrap();

        assert_eq!(surfaces[0].name, "B");
        assert_eq!(surfaces[0].grid.z, vec![vec![Some(1.0), Some(3.0)]]);
        assert_eq!(surfaces[1].name, "A");
        assert_eq!(surfaces[1].grid.z, vec![vec![Some(2.0)]]);
    }

    #[test]
    fn test_determinism() {
        let mut samples = square("A");
        samples.extend(square("B"));
        let first = build_surfaces(&samples, 0.6, true).unwrap();
        let second = build_surfaces(&samples, 0.6, true).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_rejected() {
        let samples = vec![
            Sample::new("A", 1.0, 1.0, 5.0),
            Sample::new("A", 1.0, 1.0, 9.0),
        ];
        assert!(matches!(
            build_surfaces(&samples, 0.0, false),
            Err(SurfaceError::DuplicateCoordinate { .. })
        ));
    }

    #[test]
    fn test_parameter_validation() {
        let samples = square("A");
        for bad in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                build_surfaces(&samples, bad, false),
                Err(SurfaceError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            build_surfaces(&[], 0.0, false),
            Err(SurfaceError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sparse_series() {
        let samples = vec![
            Sample::new("A", 1.0, 1.0, 1.0),
            Sample::new("A", 2.0, 2.0, 2.0),
        ];
        let surfaces = build_surfaces(&samples, 0.0, false).unwrap();
        assert_eq!(surfaces[0].grid.missing_cells(), 2);

        assert!(matches!(
            build_surfaces(&samples, 0.5, false),
            Err(SurfaceError::Validation(_))
        ));
    }

    #[test]
    fn test_custom_palettes() {
        let palettes = PaletteSet {
            color_scales: vec!["Jet".to_string()],
            flat_colors: vec!["#000000".to_string(), "#ffffff".to_string()],
        };
        let mut samples = square("A");
        samples.extend(square("B"));
        samples.extend(square("C"));

        let builder = SurfaceBuilder::new().palettes(palettes);
        let flat = builder.build(&samples).unwrap();
        assert_eq!(flat[0].color, ColorEncoding::flat("#000000"));
        assert_eq!(flat[1].color, ColorEncoding::flat("#ffffff"));
        assert_eq!(flat[2].color, ColorEncoding::flat("#000000"));

        let scaled = builder.use_color_scales(true).build(&samples).unwrap();
        assert!(scaled.iter().all(|s| s.color == ColorEncoding::named("Jet")));
    }
}
