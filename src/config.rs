//! Analysis and comparison configuration
//!
//! The per-variant analysis scripts a benchmark suite tends to accumulate
//! (linear vs. cubic hypothesis, different panel layouts) collapse into these
//! two parameter sets. Both can be loaded from a TOML file:
//!
//! ```toml
//! [analyze]
//! time_degree = 3
//! derivative_degree = 2
//! display_ceiling = 5.0
//!
//! [compare]
//! labels = ["Hashmap Implementation", "Array Implementation"]
//! ```

use crate::error::{AnalysisError, Result};
use crate::regression::ComplexityModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default ceiling above which derivative samples are hidden from plots
pub const DEFAULT_DISPLAY_CEILING: f64 = 5.0;

/// Axis captions shared by both modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabels {
    pub input: String,
    pub time: String,
    pub derivative: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            input: "Input length".to_string(),
            time: "Simulation runtime (s)".to_string(),
            derivative: "dt/dn (s)".to_string(),
        }
    }
}

/// Figure geometry, per panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureSize {
    pub panel_width: u32,
    pub panel_height: u32,
    pub font_size: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            panel_width: 750,
            panel_height: 500,
            font_size: 16,
        }
    }
}

/// Configuration for single-file analysis (runtime + derivative fits)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Degree of the runtime fit (1 = linear, 3 = cubic hypothesis)
    pub time_degree: usize,

    /// Degree of the derivative fit
    ///
    /// `None` uses `time_degree - 1`, the degree of the derivative of a
    /// degree-`time_degree` polynomial. This is a modeling assumption, so it
    /// can be set independently.
    pub derivative_degree: Option<usize>,

    /// Derivative samples at or above this value are hidden from the derivative panel
    ///
    /// Only the plot is affected; the fit always sees the full series.
    pub display_ceiling: Option<f64>,

    pub labels: AxisLabels,
    pub figure: FigureSize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::for_model(ComplexityModel::Linear)
    }
}

impl AnalysisConfig {
    /// Configuration testing the given complexity hypothesis
    pub fn for_model(model: ComplexityModel) -> Self {
        Self {
            time_degree: model.degree(),
            derivative_degree: None,
            display_ceiling: Some(DEFAULT_DISPLAY_CEILING),
            labels: AxisLabels::default(),
            figure: FigureSize::default(),
        }
    }

    /// Linear-time hypothesis
    pub fn linear() -> Self {
        Self::for_model(ComplexityModel::Linear)
    }

    /// Cubic-time hypothesis
    pub fn cubic() -> Self {
        Self::for_model(ComplexityModel::Cubic)
    }

    /// Degree actually used for the derivative fit
    pub fn effective_derivative_degree(&self) -> usize {
        self.derivative_degree
            .unwrap_or_else(|| self.time_degree.saturating_sub(1))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ceiling) = self.display_ceiling {
            if !ceiling.is_finite() {
                return Err(AnalysisError::Config(format!(
                    "display_ceiling must be finite, got {}",
                    ceiling
                )));
            }
        }
        validate_figure(&self.figure)
    }
}

/// Configuration for multi-implementation comparison
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Legend entries, one per input file; file stems are used when empty
    pub labels: Vec<String>,
    pub axes: AxisLabels,
    pub figure: FigureSize,
}

impl CompareConfig {
    pub fn validate(&self) -> Result<()> {
        validate_figure(&self.figure)
    }
}

fn validate_figure(figure: &FigureSize) -> Result<()> {
    if figure.panel_width < 100 || figure.panel_height < 100 {
        return Err(AnalysisError::Config(format!(
            "panel size must be at least 100x100, got {}x{}",
            figure.panel_width, figure.panel_height
        )));
    }
    if figure.font_size == 0 {
        return Err(AnalysisError::Config("font_size must be positive".to_string()));
    }
    Ok(())
}

/// Contents of a `--config` TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub analyze: AnalysisConfig,
    pub compare: CompareConfig,
}

impl ConfigFile {
    /// Parse a TOML configuration document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Load and parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
