//! Plotly figure JSON for surface plots
//!
//! Mirrors the subset of the plotly.js schema needed for `surface` traces and
//! a 3D scene layout. Missing grid cells serialize as `null`, which plotly.js
//! renders as holes in the surface.

use crate::config::LayoutConfig;
use crate::surface::{
    ColorEncoding, ContourAxis, DataSummary, Lighting, LightPosition, SurfaceSpec,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<SurfaceTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<Option<f64>>>,
    pub colorscale: ColorScale,
    pub showscale: bool,
    pub opacity: f64,
    pub showlegend: bool,
    pub contours: TraceContours,
    pub hovertemplate: String,
    pub lighting: TraceLighting,
    pub lightposition: Xyz,
}

/// Either a named scale or `[[position, color], ...]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    Named(String),
    Stops(Vec<(f64, String)>),
}

impl From<&ColorEncoding> for ColorScale {
    fn from(encoding: &ColorEncoding) -> Self {
        match encoding {
            ColorEncoding::Named(name) => ColorScale::Named(name.clone()),
            ColorEncoding::Stops(stops) => ColorScale::Stops(
                stops
                    .iter()
                    .map(|s| (s.position, s.color.clone()))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceContours {
    pub x: TraceContour,
    pub y: TraceContour,
    pub z: TraceContour,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceContour {
    pub show: bool,
    pub color: String,
    pub width: f64,
    pub highlightwidth: f64,
    pub highlightcolor: String,
    pub project: Projection,
}

/// Projection flags; only the contour's own axis is set
#[derive(Debug, Clone, Default, Serialize)]
pub struct Projection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

impl TraceContour {
    fn from_axis(contour: &ContourAxis, axis: Axis) -> Self {
        let flag = Some(contour.project);
        let project = match axis {
            Axis::X => Projection {
                x: flag,
                ..Default::default()
            },
            Axis::Y => Projection {
                y: flag,
                ..Default::default()
            },
            Axis::Z => Projection {
                z: flag,
                ..Default::default()
            },
        };
        TraceContour {
            show: contour.show,
            color: contour.color.clone(),
            width: contour.width,
            highlightwidth: contour.highlight_width,
            highlightcolor: contour.highlight_color.clone(),
            project,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraceLighting {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub roughness: f64,
    pub fresnel: f64,
}

impl From<&Lighting> for TraceLighting {
    fn from(l: &Lighting) -> Self {
        TraceLighting {
            ambient: l.ambient,
            diffuse: l.diffuse,
            specular: l.specular,
            roughness: l.roughness,
            fresnel: l.fresnel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 3]> for Xyz {
    fn from(v: [f64; 3]) -> Self {
        Xyz {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

impl From<&LightPosition> for Xyz {
    fn from(p: &LightPosition) -> Self {
        Xyz {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<&SurfaceSpec> for SurfaceTrace {
    fn from(spec: &SurfaceSpec) -> Self {
        SurfaceTrace {
            trace_type: "surface",
            name: spec.name.clone(),
            x: spec.grid.x.clone(),
            y: spec.grid.y.clone(),
            z: spec.grid.z.clone(),
            colorscale: ColorScale::from(&spec.color),
            showscale: spec.show_scale,
            opacity: spec.opacity,
            showlegend: spec.show_legend,
            contours: TraceContours {
                x: TraceContour::from_axis(&spec.contours.x, Axis::X),
                y: TraceContour::from_axis(&spec.contours.y, Axis::Y),
                z: TraceContour::from_axis(&spec.contours.z, Axis::Z),
            },
            hovertemplate: spec.hover_template.clone(),
            lighting: TraceLighting::from(&spec.lighting),
            lightposition: Xyz::from(&spec.light_position),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub scene: Scene,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Title {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub xaxis: SceneAxis,
    pub yaxis: SceneAxis,
    pub zaxis: SceneAxis,
    pub aspectratio: Xyz,
    pub camera: Camera,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneAxis {
    pub title: Title,
    /// Omitted when the data has no finite extent on this axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

impl SceneAxis {
    fn new(title: &str, min: f64, max: f64) -> Self {
        let range = (min.is_finite() && max.is_finite()).then_some([min, max]);
        SceneAxis {
            title: Title::new(title),
            range,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub eye: Xyz,
}

impl Figure {
    /// One surface trace per spec; scene ranges span the raw input data
    pub fn from_surfaces(
        surfaces: &[SurfaceSpec],
        summary: &DataSummary,
        layout: &LayoutConfig,
    ) -> Self {
        let scene = Scene {
            xaxis: SceneAxis::new(&layout.x_axis_title, summary.x_min, summary.x_max),
            yaxis: SceneAxis::new(&layout.y_axis_title, summary.y_min, summary.y_max),
            zaxis: SceneAxis::new(&layout.z_axis_title, summary.z_min, summary.z_max),
            aspectratio: Xyz::from(layout.aspect_ratio),
            camera: Camera {
                eye: Xyz::from(layout.camera_eye),
            },
        };

        Figure {
            data: surfaces.iter().map(SurfaceTrace::from).collect(),
            layout: Layout {
                title: Title::new(&layout.title),
                scene,
                legend: Legend {
                    title: Title::new(&layout.legend_title),
                },
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
