//! Plotly output
//!
//! Structure:
//! - `figure.rs`: Serializable figure (surface traces + 3D scene layout)
//! - `html.rs`: HTML document embedding the figure and loading plotly.js

pub mod figure;
pub mod html;

pub use figure::Figure;
pub use html::PlotlyJs;
