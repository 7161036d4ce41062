//! Command-line parsing for the curve-fitting tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fitting/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "cfit",
    version,
    about = "Least-squares curve fitting with worked solutions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the requested curve families and print the full worked solutions.
    Fit(FitArgs),
    /// Print per-family scores and the winning family only.
    Best(FitArgs),
}

/// Common options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Comma-separated x values.
    #[arg(
        short = 'x',
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        required_unless_present = "input"
    )]
    pub x: Vec<f64>,

    /// Comma-separated y values (same length as x).
    #[arg(
        short = 'y',
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        required_unless_present = "input"
    )]
    pub y: Vec<f64>,

    /// Curve families to fit: linear, quadratic, exponential, logarithmic,
    /// power, or all.
    #[arg(short = 't', long = "types", value_delimiter = ',', default_value = "all")]
    pub types: Vec<String>,

    /// Read the request from a JSON file ({"x": [...], "y": [...], "types": [...]})
    /// instead of --x/--y.
    #[arg(long, conflicts_with_all = ["x", "y"])]
    pub input: Option<PathBuf>,

    /// Write the full report as JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
