//! Surface Plot Operator - Main entry point
//!
//! Reads a delimited table of `(series, x, y, z)` samples, builds one 3D
//! surface per series and writes an interactive Plotly HTML document.
//!
//! Usage:
//! ```bash
//! surface_plot_operator data_small.csv --smooth 0.6 -o surface_plot.html
//! RUST_LOG=surface_plot_operator=debug surface_plot_operator data.csv -c config.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use surface_plot_operator::config::PlotConfig;
use surface_plot_operator::pipeline;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "surface_plot_operator")]
#[command(author, version, about = "Render multi-series 3D surface plots from tabular samples")]
struct Args {
    /// Input table with series, x, y and z columns
    #[arg(default_value = "data_small.csv")]
    input: PathBuf,

    /// Output HTML file (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gaussian smoothing factor in [0, 1] (overrides config)
    #[arg(long)]
    smooth: Option<f64>,

    /// Use named continuous color scales instead of flat colors
    #[arg(long)]
    color_scales: bool,

    /// Input field separator (overrides config)
    #[arg(long)]
    separator: Option<char>,

    /// Plot title (overrides config)
    #[arg(long)]
    title: Option<String>,

    /// Inline this plotly.js file so the HTML works offline (overrides config)
    #[arg(long)]
    plotly_js_file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surface_plot_operator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("Surface Plot Operator v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    println!("Configuration:");
    println!("  Input: {}", args.input.display());
    println!("  Smooth factor: {}", config.smooth_factor);
    println!("  Color scales: {}", config.use_color_scales);
    println!("  Separator: '{}'", config.separator);
    if let Some(ref file) = config.plotly_js_file {
        println!("  plotly.js: inlined from {}", file.display());
    }
    println!();

    let plot = pipeline::generate_plot(&args.input, &config)
        .with_context(|| format!("failed to plot {}", args.input.display()))?;

    let path = pipeline::save_plot(&plot, None)
        .with_context(|| format!("failed to write {}", plot.filename))?;

    println!(
        "✓ Wrote {} surface(s) from {} rows to {}",
        plot.n_surfaces,
        plot.summary.total_rows,
        path.display()
    );
    Ok(())
}

/// Config file (if any), then command-line overrides
fn load_config(args: &Args) -> Result<PlotConfig> {
    let mut config = match args.config {
        Some(ref path) => PlotConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlotConfig::default(),
    };

    if let Some(smooth) = args.smooth {
        config.smooth_factor = smooth;
    }
    if args.color_scales {
        config.use_color_scales = true;
    }
    if let Some(separator) = args.separator {
        config.separator = separator;
    }
    if let Some(ref title) = args.title {
        config.layout.title = title.clone();
    }
    if let Some(ref file) = args.plotly_js_file {
        config.plotly_js_file = Some(file.clone());
    }
    if let Some(ref output) = args.output {
        config.output = output.to_string_lossy().into_owned();
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
