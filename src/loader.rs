//! Record loader for benchmark harness output
//!
//! The harness writes one record per line, comma-separated, no header:
//!
//! ```text
//! <input_size>,<elapsed_time>
//! <input_size>,<elapsed_time>,<time_derivative>
//! ```
//!
//! Records are kept in file order. When a derivative column is present the
//! first derivative is forced to `0.0`: the harness differentiates against the
//! previous run, and the first run has none.

use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single parsed line of a result file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkRecord {
    pub input_size: u64,
    pub elapsed_time: f64,
    pub time_derivative: Option<f64>,
}

/// Parallel-array form of one result file
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    /// File the series was loaded from
    pub source: PathBuf,
    pub input_sizes: Vec<u64>,
    pub times: Vec<f64>,
    /// Present only for the 3-column form
    pub derivatives: Option<Vec<f64>>,
}

impl SampleSeries {
    /// Build a series from already-parsed records, applying the first-derivative rule
    pub fn from_records(source: impl Into<PathBuf>, records: &[BenchmarkRecord]) -> Self {
        let input_sizes = records.iter().map(|r| r.input_size).collect();
        let times = records.iter().map(|r| r.elapsed_time).collect();

        let mut derivatives: Option<Vec<f64>> = records
            .iter()
            .map(|r| r.time_derivative)
            .collect::<Option<Vec<f64>>>()
            .filter(|_| records.first().is_some_and(|r| r.time_derivative.is_some()));

        if let Some(first) = derivatives.as_mut().and_then(|d| d.first_mut()) {
            *first = 0.0;
        }

        Self {
            source: source.into(),
            input_sizes,
            times,
            derivatives,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.input_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_sizes.is_empty()
    }

    /// Input sizes as floating point, for fitting and plotting
    pub fn xs(&self) -> Vec<f64> {
        self.input_sizes.iter().map(|&n| n as f64).collect()
    }

    /// Whether the file carried the derivative column
    pub fn has_derivatives(&self) -> bool {
        self.derivatives.is_some()
    }

    /// Display name: the file stem, falling back to the full path
    pub fn label(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Load one result file
pub fn load(path: impl AsRef<Path>) -> Result<SampleSeries> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let series = parse_series(path, &text)?;
    debug!(
        path = %path.display(),
        records = series.len(),
        derivatives = series.has_derivatives(),
        "loaded benchmark results"
    );
    Ok(series)
}

/// Load several result files, one series per file, in argument order
pub fn load_many<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SampleSeries>> {
    paths.iter().map(load).collect()
}

/// Parse the textual contents of a result file
///
/// `source` is only used for error reporting and labeling.
pub fn parse_series(source: impl AsRef<Path>, text: &str) -> Result<SampleSeries> {
    let source = source.as_ref();
    let lines: Vec<&str> = text.lines().collect();

    // The harness terminates every record with a newline; tolerate trailing blanks only
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);

    let mut records = Vec::with_capacity(end);
    let mut columns: Option<usize> = None;

    for (idx, line) in lines[..end].iter().enumerate() {
        let line_no = idx + 1;
        let malformed = |reason: String| AnalysisError::MalformedRecord {
            path: source.to_path_buf(),
            line: line_no,
            reason,
        };

        let record = parse_record(line).map_err(malformed)?;
        let width = if record.time_derivative.is_some() { 3 } else { 2 };

        match columns {
            None => columns = Some(width),
            Some(expected) if expected != width => {
                return Err(malformed(format!(
                    "expected {expected} fields like the preceding records, found {width}"
                )));
            }
            Some(_) => {}
        }

        records.push(record);
    }

    Ok(SampleSeries::from_records(source, &records))
}

/// Parse a single `size,time[,derivative]` line
pub fn parse_record(line: &str) -> std::result::Result<BenchmarkRecord, String> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();

    if !(2..=3).contains(&fields.len()) {
        return Err(format!("expected 2 or 3 fields, found {}", fields.len()));
    }

    let input_size = fields[0]
        .parse::<u64>()
        .map_err(|e| format!("input size {:?} is not an integer: {}", fields[0], e))?;
    let elapsed_time = parse_real(fields[1], "elapsed time")?;
    let time_derivative = fields
        .get(2)
        .map(|f| parse_real(f, "time derivative"))
        .transpose()?;

    Ok(BenchmarkRecord {
        input_size,
        elapsed_time,
        time_derivative,
    })
}

fn parse_real(field: &str, what: &str) -> std::result::Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|e| format!("{} {:?} is not a number: {}", what, field, e))
}
