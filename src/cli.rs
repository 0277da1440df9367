//! CLI argument parsing for Benchfit

use crate::regression::ComplexityModel;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for fit reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchfit")]
#[command(version)]
#[command(about = "Polynomial complexity fitting and comparison plots for benchmark results", long_about = None)]
pub struct Cli {
    /// Enable debug tracing on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// TOML configuration file (explicit flags take precedence)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit runtime and derivative of one result file against a complexity hypothesis
    Analyze(AnalyzeArgs),
    /// Overlay the runtime curves of several implementations
    Compare(CompareArgs),
}

/// Where the figure goes and whether to wait for the user
#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    /// Output SVG figure path
    #[arg(short, long, value_name = "FILE", default_value = "benchfit.svg")]
    pub output: PathBuf,

    /// Write the figure and exit without waiting for the viewer to be dismissed
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Benchmark result file (size,time[,derivative] per line)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Complexity hypothesis for the runtime fit
    #[arg(short, long, value_enum)]
    pub model: Option<ComplexityModel>,

    /// Explicit runtime fit degree (overrides --model)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub degree: Option<i64>,

    /// Derivative fit degree (default: runtime degree - 1)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub derivative_degree: Option<i64>,

    /// Hide derivative samples at or above this value from the plot (default: 5)
    #[arg(long, value_name = "VALUE", conflicts_with = "no_clip")]
    pub ceiling: Option<f64>,

    /// Show every derivative sample
    #[arg(long)]
    pub no_clip: bool,

    /// Report format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub figure: FigureArgs,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Benchmark result files, one per implementation
    #[arg(value_name = "FILE", num_args = 2.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Legend entry per file, in order (default: file name)
    #[arg(short, long = "label", value_name = "NAME")]
    pub labels: Vec<String>,

    #[command(flatten)]
    pub figure: FigureArgs,
}
