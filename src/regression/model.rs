// Polynomial model fitting for benchmark series
//
// One degree-parameterised entry point serves both standing use cases:
// runtime against input size at the hypothesis degree, and the harness's
// derivative against input size at a (usually lower) derivative degree. The
// derivative fit is independent of the runtime fit, so its R² carries its own
// information.

use crate::error::{AnalysisError, Result};
use crate::regression::polynomial::{self, ScaledPolynomial};
use crate::regression::score::r_squared;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Complexity hypothesis selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityModel {
    /// Runtime grows linearly with input size (degree 1)
    Linear,
    /// Runtime grows cubically with input size (degree 3)
    Cubic,
}

impl ComplexityModel {
    /// Polynomial degree for the runtime fit
    pub fn degree(self) -> usize {
        match self {
            ComplexityModel::Linear => 1,
            ComplexityModel::Cubic => 3,
        }
    }

    /// Legend caption for the regression overlay
    pub fn caption(degree: usize) -> &'static str {
        match degree {
            0 => "Constant fit",
            1 => "Linear regression",
            2 => "Quadratic fit",
            3 => "Cubic fit",
            _ => "Polynomial fit",
        }
    }
}

/// Outcome of fitting one series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    /// Polynomial degree used
    pub degree: usize,
    /// Coefficients, highest degree first
    pub coefficients: Vec<f64>,
    /// Fitted value at every input x, in input order
    pub predicted: Vec<f64>,
    /// Coefficient of determination
    pub r_squared: f64,
    #[serde(skip)]
    polynomial: Option<ScaledPolynomial>,
}

impl FitResult {
    /// Evaluate the fitted polynomial at an arbitrary x
    pub fn evaluate(&self, x: f64) -> f64 {
        match &self.polynomial {
            Some(p) => p.evaluate(x),
            None => polynomial::evaluate(&self.coefficients, x),
        }
    }

    /// R² rounded to 3 decimals, as shown in legends
    pub fn r_squared_rounded(&self) -> f64 {
        (self.r_squared * 1000.0).round() / 1000.0
    }

    /// Human-readable equation, e.g. `y = 2.000e0·x^2 - 1.000e0`
    pub fn equation(&self) -> String {
        let mut out = String::from("y =");
        let last = self.coefficients.len().saturating_sub(1);

        for (i, &c) in self.coefficients.iter().enumerate() {
            let power = last - i;
            let sign = if c < 0.0 { '-' } else { '+' };
            if i == 0 {
                if c < 0.0 {
                    out.push_str(" -");
                }
                out.push(' ');
            } else {
                out.push_str(&format!(" {} ", sign));
            }
            out.push_str(&format!("{:.3e}", c.abs()));
            match power {
                0 => {}
                1 => out.push_str("·x"),
                p => out.push_str(&format!("·x^{}", p)),
            }
        }

        out
    }
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "degree {} fit, r^2 = {:.6} ({})",
            self.degree,
            self.r_squared,
            self.equation()
        )
    }
}

/// Fit a polynomial of `degree` to `y` against `x` and score it
///
/// # Errors
/// - [`AnalysisError::InvalidDegree`] for a negative degree (checked first)
/// - [`AnalysisError::LengthMismatch`] when `x` and `y` differ in length
/// - [`AnalysisError::InsufficientData`] for fewer than `degree + 1` points
/// - [`AnalysisError::DegenerateFit`] for a constant target the model misses
///
/// # Example
/// ```
/// use benchfit::regression::fit;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let y = [1.0, 4.0, 9.0, 16.0];
/// let result = fit(&x, &y, 2).unwrap();
/// assert!((result.r_squared - 1.0).abs() < 1e-9);
/// ```
pub fn fit(x: &[f64], y: &[f64], degree: i64) -> Result<FitResult> {
    if degree < 0 {
        return Err(AnalysisError::InvalidDegree(degree));
    }
    let degree = usize::try_from(degree).map_err(|_| AnalysisError::InvalidDegree(degree))?;

    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let required = degree
        .checked_add(1)
        .ok_or(AnalysisError::InvalidDegree(degree as i64))?;
    if x.len() < required {
        return Err(AnalysisError::InsufficientData {
            required,
            actual: x.len(),
        });
    }

    let poly = polynomial::least_squares(x, y, degree)?;
    let predicted: Vec<f64> = x.iter().map(|&xi| poly.evaluate(xi)).collect();
    let r_squared = r_squared(y, &predicted)?;

    debug!(degree, samples = x.len(), r_squared, "fitted polynomial");

    Ok(FitResult {
        degree,
        coefficients: poly.coefficients_highest_first(),
        predicted,
        r_squared,
        polynomial: Some(poly),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_degrees() {
        assert_eq!(ComplexityModel::Linear.degree(), 1);
        assert_eq!(ComplexityModel::Cubic.degree(), 3);
    }

    #[test]
    fn test_caption() {
        assert_eq!(ComplexityModel::caption(1), "Linear regression");
        assert_eq!(ComplexityModel::caption(3), "Cubic fit");
        assert_eq!(ComplexityModel::caption(7), "Polynomial fit");
    }

    #[test]
    fn test_negative_degree_rejected_before_data_checks() {
        assert!(matches!(
            fit(&[], &[], -1),
            Err(AnalysisError::InvalidDegree(-1))
        ));
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            fit(&[1.0, 2.0], &[1.0, 2.0], 3),
            Err(AnalysisError::InsufficientData {
                required: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        assert!(matches!(
            fit(&[], &[], 0),
            Err(AnalysisError::InsufficientData {
                required: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_constant_series_degree_zero() {
        let result = fit(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0], 0).unwrap();
        assert_eq!(result.r_squared, 1.0);
        assert!((result.coefficients[0] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_matches_predicted() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.1, 0.9, 4.2, 8.8, 16.1];
        let result = fit(&x, &y, 2).unwrap();
        for (xi, pi) in x.iter().zip(&result.predicted) {
            assert!((result.evaluate(*xi) - pi).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rounded_r_squared() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.1, 1.9, 3.2];
        let result = fit(&x, &y, 1).unwrap();
        let rounded = result.r_squared_rounded();
        assert!((rounded * 1000.0 - (rounded * 1000.0).round()).abs() < 1e-9);
    }

    #[test]
    fn test_equation_rendering() {
        let result = fit(&[1.0, 2.0, 3.0], &[1.0, 4.0, 9.0], 2).unwrap();
        let eq = result.equation();
        assert!(eq.starts_with("y = 1.000e0·x^2"), "{}", eq);
    }
}
