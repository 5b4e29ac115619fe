//! Mosaic CLI - run the treemap and curve engines against a fixture.

#![allow(
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::unwrap_used,
    clippy::doc_markdown
)]

use clap::{Parser, Subcommand, ValueEnum};
use mosaic_chart::{curve_path, polyline, to_svg_path, CurveError, SampleResult, TimeRange};
use mosaic_core::Size;
use mosaic_layout::{LayoutRect, TreemapEngine};
use mosaic_yaml::{Fixture, ParseError};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "mosaic")]
#[command(about = "Treemap layouts and usage curves from YAML fixtures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check fixture validity
    Check {
        /// Path to fixture file
        fixture: PathBuf,
    },

    /// Lay out the fixture items as a treemap
    Treemap {
        /// Path to fixture file
        fixture: PathBuf,

        /// Container width (defaults to the fixture viewport)
        #[arg(long)]
        width: Option<f32>,

        /// Container height (defaults to the fixture viewport)
        #[arg(long)]
        height: Option<f32>,

        /// Seed for a reproducible layout (overrides the fixture seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Sample a usage curve at a pointer x coordinate
    Sample {
        /// Path to fixture file
        fixture: PathBuf,

        /// Pointer x in chart coordinates (clamped to the curve)
        #[arg(short, long, allow_hyphen_values = true)]
        x: f64,

        /// Time range (defaults to the fixture's default_mode)
        #[arg(short, long)]
        mode: Option<TimeRange>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the drawn path of a usage curve
    Path {
        /// Path to fixture file
        fixture: PathBuf,

        /// Time range (defaults to the fixture's default_mode)
        #[arg(short, long)]
        mode: Option<TimeRange>,

        /// Flatten into a polyline with this many steps per segment
        #[arg(long)]
        segments: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Fixture(#[from] ParseError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let output = match command {
        Commands::Check { fixture } => check_fixture(&Fixture::from_path(&fixture)?)?,
        Commands::Treemap {
            fixture,
            width,
            height,
            seed,
            format,
        } => {
            let fixture = Fixture::from_path(&fixture)?;
            let viewport = fixture.viewport_size();
            let viewport = Size::new(
                width.unwrap_or(viewport.width),
                height.unwrap_or(viewport.height),
            );
            let mut engine = seed.map_or_else(|| fixture.engine(), TreemapEngine::seeded);
            let rects = engine.layout(&fixture.layout_items(), viewport);
            log::info!("laid out {} tile(s) in {:?}", rects.len(), viewport);
            render_treemap(&rects, viewport, format)?
        }
        Commands::Sample {
            fixture,
            x,
            mode,
            format,
        } => {
            let fixture = Fixture::from_path(&fixture)?;
            let mode = mode.unwrap_or(fixture.default_mode);
            let sample = fixture.anchor_set(mode)?.sample(x, mode);
            render_sample(&sample, mode, format)?
        }
        Commands::Path {
            fixture,
            mode,
            segments,
            format,
        } => {
            let fixture = Fixture::from_path(&fixture)?;
            let mode = mode.unwrap_or(fixture.default_mode);
            let anchors = fixture.anchor_set(mode)?;
            render_path(anchors.as_slice(), mode, segments, format)?
        }
    };
    println!("{}", output);
    Ok(())
}

fn check_fixture(fixture: &Fixture) -> Result<String, CliError> {
    let mut out = String::new();
    let _ = writeln!(out, "Fixture valid!");
    let _ = writeln!(out, "  Name: {}", fixture.name);
    let _ = writeln!(
        out,
        "  Items: {} ({} laid out)",
        fixture.items.len(),
        fixture.layout_items().len()
    );
    let modes: Vec<String> = fixture.anchor_sets()?.keys().map(ToString::to_string).collect();
    let _ = write!(out, "  Curves: {}", modes.join(", "));
    Ok(out)
}

fn render_treemap(
    rects: &[LayoutRect],
    viewport: Size,
    format: OutputFormat,
) -> Result<String, CliError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(rects)?);
    }

    let total = viewport.area();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>9} {:>8} {:>8} {:>8} {:>8} {:>7}",
        "NAME", "VALUE", "X", "Y", "WIDTH", "HEIGHT", "SHARE"
    );
    for r in rects {
        let share = if total > 0.0 { r.area() / total * 100.0 } else { 0.0 };
        let _ = writeln!(
            out,
            "{:<20} {:>9.2} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>6.1}%",
            r.item.name,
            r.item.value,
            r.bounds.x,
            r.bounds.y,
            r.bounds.width,
            r.bounds.height,
            share
        );
    }
    Ok(out.trim_end().to_string())
}

fn render_sample(
    sample: &SampleResult,
    mode: TimeRange,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(sample)?),
        OutputFormat::Text => Ok(format!(
            "{} x={:.1} y={:.2} value={} label={}",
            mode, sample.x, sample.y, sample.value, sample.label
        )),
    }
}

fn render_path(
    anchors: &[mosaic_chart::CurveAnchor],
    mode: TimeRange,
    segments: Option<usize>,
    format: OutputFormat,
) -> Result<String, CliError> {
    match (segments, format) {
        (Some(n), OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(&polyline(mode, anchors, n))?)
        }
        (Some(n), OutputFormat::Text) => Ok(polyline(mode, anchors, n)
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join("\n")),
        (None, OutputFormat::Json) => Ok(serde_json::to_string_pretty(&curve_path(mode, anchors))?),
        (None, OutputFormat::Text) => Ok(to_svg_path(&curve_path(mode, anchors))),
    }
}
