//! Analysis reports for the console (text) and for machine parsing (JSON)

use crate::regression::FitResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one fitted series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub degree: usize,
    /// Coefficients, highest degree first
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub equation: String,
}

impl From<&FitResult> for FitSummary {
    fn from(fit: &FitResult) -> Self {
        Self {
            degree: fit.degree,
            coefficients: fit.coefficients.clone(),
            r_squared: fit.r_squared,
            equation: fit.equation(),
        }
    }
}

/// Result of analysing one benchmark file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Result file that was analysed
    pub source: String,
    /// Number of records in the file
    pub samples: usize,
    /// Runtime against input size
    pub time_fit: FitSummary,
    /// Derivative against input size (3-column files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_fit: Option<FitSummary>,
}

impl AnalysisReport {
    pub fn new(
        source: &Path,
        samples: usize,
        time_fit: &FitResult,
        derivative_fit: Option<&FitResult>,
    ) -> Self {
        Self {
            source: source.display().to_string(),
            samples,
            time_fit: time_fit.into(),
            derivative_fit: derivative_fit.map(FitSummary::from),
        }
    }

    /// Human-readable report printed after the figure is dismissed
    pub fn to_report_string(&self) -> String {
        let mut report = format!("{} ({} samples)\n", self.source, self.samples);
        push_fit(&mut report, "time", &self.time_fit);
        if let Some(derivative) = &self.derivative_fit {
            push_fit(&mut report, "derivative", derivative);
        }
        report
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Report lines for the fits that succeeded when another one failed
pub fn succeeded_fits_string(
    time_fit: Option<&FitResult>,
    derivative_fit: Option<&FitResult>,
) -> String {
    let mut report = String::new();
    if let Some(fit) = time_fit {
        push_fit(&mut report, "time", &FitSummary::from(fit));
    }
    if let Some(fit) = derivative_fit {
        push_fit(&mut report, "derivative", &FitSummary::from(fit));
    }
    report
}

fn push_fit(report: &mut String, name: &str, fit: &FitSummary) {
    report.push_str(&format!(
        "{} fit (degree {}): r^2 = {:.6}\n",
        name, fit.degree, fit.r_squared
    ));
    report.push_str(&format!("  {}\n", fit.equation));
}
