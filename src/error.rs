//! Error taxonomy for loading, fitting and rendering benchmark results

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised anywhere in the load → fit → render pipeline
///
/// Every variant carries enough context (file, line, or parameter) to
/// diagnose the failure without re-running the analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{}:{line}: malformed record: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid polynomial degree: {0} (must be >= 0)")]
    InvalidDegree(i64),

    #[error(
        "Degenerate fit: target series is constant ({mean}) but the model deviates by {max_residual}"
    )]
    DegenerateFit { mean: f64, max_residual: f64 },

    #[error("Sample length mismatch: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Invalid plot spec: {0}")]
    InvalidPlotSpec(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
