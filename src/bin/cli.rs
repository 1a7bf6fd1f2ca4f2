// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! BendPrep CLI

use anyhow::{bail, Context, Result};
use bendprep::cli::{Prompter, Reporter};
use bendprep::config::BendPrepConfig;
use bendprep::error::BendError;
use bendprep::geometry::stl_to_svg;
use bendprep::io;
use bendprep::wire::{Editor, PathCollection, SegmentKind};
use bendprep::{compute_bend_allowance, BendSpec, FlatPattern};
use clap::{Parser, Subcommand};
use nalgebra::Point2;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "bendprep")]
#[command(about = "BendPrep - bend allowance and wire path preparation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./bendprep.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bend allowance of one bend, prompting for missing values
    Allowance {
        /// Material thickness
        #[arg(short, long)]
        thickness: Option<f64>,

        /// Bend angle in degrees
        #[arg(short, long)]
        angle: Option<f64>,

        /// Inside bend radius
        #[arg(short, long)]
        radius: Option<f64>,

        /// Neutral axis position as a fraction of thickness
        #[arg(short, long)]
        k_factor: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the flat length of a bent profile
    Flat {
        /// Material thickness
        #[arg(short, long)]
        thickness: f64,

        /// Inside bend radius
        #[arg(short, long)]
        radius: f64,

        /// Neutral axis position (defaults to the configured K-factor)
        #[arg(short, long)]
        k_factor: Option<f64>,

        /// Straight leg lengths, in order
        #[arg(short, long = "leg", required = true)]
        legs: Vec<f64>,

        /// Bend angles between consecutive legs, in order
        #[arg(short, long = "angle")]
        angles: Vec<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the wire length of every path in an SVG drawing
    Length {
        /// Input SVG file
        input: PathBuf,
    },

    /// Print feed lengths and bend angles for every path in an SVG drawing
    Schedule {
        /// Input SVG file
        input: PathBuf,

        /// Print the schedule as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply editing operations to a drawing and write the result
    Edit {
        /// Output SVG file
        output: PathBuf,

        /// Drawing to start from (empty when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Operations applied in order: line:X,Y  curve:X,Y  snip:X,Y  drag:X,Y:X,Y
        #[arg(short = 'x', long = "op", value_name = "OP")]
        ops: Vec<String>,

        /// Set the wire diameter of every path
        #[arg(short, long)]
        diameter: Option<f64>,
    },

    /// Extract the centerline of an STL wire model into an SVG drawing
    Centerline {
        /// Input STL file
        input: PathBuf,

        /// Output SVG file
        output: PathBuf,

        /// Output scale
        #[arg(short, long)]
        scale: Option<f64>,

        /// Allowed curve deviation as a percentage of wire diameter
        #[arg(short, long)]
        error: Option<f64>,

        /// Number of facets sampled from large meshes
        #[arg(long)]
        sample_size: Option<usize>,
    },

    /// Show version information
    Version,
}

fn main() {
    // Help and version go to stdout with clap's exit code; bad arguments exit 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            err.print().ok();
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = BendPrepConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Allowance {
            thickness,
            angle,
            radius,
            k_factor,
            json,
        } => allowance_command(&config, [thickness, angle, radius, k_factor], json),
        Commands::Flat {
            thickness,
            radius,
            k_factor,
            legs,
            angles,
            json,
        } => flat_command(
            thickness,
            radius,
            k_factor.unwrap_or(config.default_k_factor),
            &legs,
            &angles,
            json,
        ),
        Commands::Length { input } => {
            let paths = io::import_svg_file(&input)?;
            Reporter::report_lengths(&input.display().to_string(), &paths, config.curve_steps);
            Ok(())
        }
        Commands::Schedule { input, json } => schedule_command(&config, &input, json),
        Commands::Edit {
            output,
            input,
            ops,
            diameter,
        } => edit_command(&config, input.as_deref(), &output, &ops, diameter),
        Commands::Centerline {
            input,
            output,
            scale,
            error,
            sample_size,
        } => {
            let mut options = config.centerline;
            if let Some(scale) = scale {
                options.scale = scale;
            }
            if let Some(error) = error {
                options.max_error = error;
            }
            if let Some(sample_size) = sample_size {
                if sample_size == 0 {
                    bail!("--sample-size must be at least 1");
                }
                options.sample_size = sample_size;
            }

            let start = std::time::Instant::now();
            let summary = stl_to_svg(&input, &output, &options)?;
            Reporter::report_centerline(
                &input.display().to_string(),
                &output.display().to_string(),
                &summary,
                start.elapsed(),
            );
            Ok(())
        }
        Commands::Version => {
            println!("BendPrep v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn allowance_command(config: &BendPrepConfig, given: [Option<f64>; 4], json: bool) -> Result<()> {
    let [thickness, angle, radius, k_factor] = given;

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let spec = BendSpec::new(
        prompter.number_or(thickness, "Material thickness", None)?,
        prompter.number_or(angle, "Bend angle (degrees)", None)?,
        prompter.number_or(radius, "Inside radius", None)?,
        prompter.number_or(k_factor, "K-factor", Some(config.default_k_factor))?,
    );

    let result = compute_bend_allowance(&spec).map_err(invalid_input)?;
    info!(allowance = result.bend_allowance, "bend computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        Reporter::report_bend(&spec, &result);
    }
    Ok(())
}

fn flat_command(
    thickness: f64,
    radius: f64,
    k_factor: f64,
    legs: &[f64],
    angles: &[f64],
    json: bool,
) -> Result<()> {
    if angles.len() + 1 != legs.len() {
        bail!(
            "{} legs need {} angles, got {}",
            legs.len(),
            legs.len().saturating_sub(1),
            angles.len()
        );
    }

    let mut pattern = FlatPattern::new(thickness, radius, k_factor).leg(legs[0]);
    for (angle, leg) in angles.iter().zip(&legs[1..]) {
        pattern = pattern.bend(*angle).leg(*leg);
    }

    let flat = pattern.compute().map_err(invalid_input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&flat)?);
    } else {
        Reporter::report_flat(&flat);
    }
    Ok(())
}

fn schedule_command(config: &BendPrepConfig, input: &Path, json: bool) -> Result<()> {
    let paths = io::import_svg_file(input)?;
    if json {
        let schedules: Vec<_> = paths
            .iter()
            .map(|p| p.bend_schedule(config.curve_steps))
            .collect();
        println!("{}", serde_json::to_string_pretty(&schedules)?);
    } else {
        Reporter::report_schedule(&input.display().to_string(), &paths, config.curve_steps);
    }
    Ok(())
}

fn edit_command(
    config: &BendPrepConfig,
    input: Option<&Path>,
    output: &Path,
    ops: &[String],
    diameter: Option<f64>,
) -> Result<()> {
    let mut collection = PathCollection::with_wire_diameter(config.default_wire_diameter)?;
    if let Some(input) = input {
        collection.import(io::import_svg_file(input)?);
    }

    let mut editor = Editor::with_settings(collection, config.editor_settings());
    for op in ops {
        let applied = match parse_op(op)? {
            EditOp::Add(kind, at) => {
                editor.set_add_mode(kind);
                editor.click(at)
            }
            EditOp::Snip(at) => {
                editor.toggle_snip();
                let snipped = editor.click(at);
                editor.toggle_snip();
                snipped
            }
            EditOp::Drag(from, to) => {
                let moved = editor.begin_drag(from) && editor.drag_to(to);
                editor.end_drag();
                moved
            }
        };
        if !applied {
            Reporter::report_warning(&format!("operation {} did not hit anything", op));
        }
    }

    let mut collection = editor.into_collection();
    if let Some(diameter) = diameter {
        collection.set_wire_diameter(diameter, None)?;
    }

    io::export_svg_file(collection.paths(), output)?;
    Reporter::success(&format!(
        "Wrote {} paths ({:.4} total) to {}",
        collection.len(),
        collection.total_length(config.curve_steps),
        output.display()
    ));
    Ok(())
}

enum EditOp {
    Add(SegmentKind, Point2<f64>),
    Snip(Point2<f64>),
    Drag(Point2<f64>, Point2<f64>),
}

fn parse_op(op: &str) -> Result<EditOp> {
    let (name, args) = op
        .split_once(':')
        .with_context(|| format!("Malformed operation: {}", op))?;
    match name {
        "line" => Ok(EditOp::Add(SegmentKind::Line, parse_point(args)?)),
        "curve" => Ok(EditOp::Add(SegmentKind::Curve, parse_point(args)?)),
        "snip" => Ok(EditOp::Snip(parse_point(args)?)),
        "drag" => {
            let (from, to) = args
                .split_once(':')
                .with_context(|| format!("drag needs two points: {}", op))?;
            Ok(EditOp::Drag(parse_point(from)?, parse_point(to)?))
        }
        _ => bail!("Unknown operation: {}", name),
    }
}

fn parse_point(text: &str) -> Result<Point2<f64>> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("Expected X,Y: {}", text))?;
    let x = x.trim().parse().with_context(|| format!("Invalid x: {}", x))?;
    let y = y.trim().parse().with_context(|| format!("Invalid y: {}", y))?;
    Ok(Point2::new(x, y))
}

fn invalid_input(err: BendError) -> anyhow::Error {
    anyhow::Error::new(err).context("Invalid input")
}
