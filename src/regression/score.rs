// Goodness-of-fit scoring
//
// R² = 1 - SS_res / SS_tot. A constant target (all values identical) has no
// variance to explain, so R² is only defined when the model reproduces the
// constant; anything else is a degenerate fit.

use crate::error::{AnalysisError, Result};

/// Relative tolerance used to decide that predictions reproduce a constant target
pub const CONSTANT_MATCH_TOLERANCE: f64 = 1e-9;

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination between `actual` and `predicted`
///
/// # Example
/// ```
/// use benchfit::regression::r_squared;
///
/// let actual = [1.0, 2.0, 3.0];
/// assert_eq!(r_squared(&actual, &actual).unwrap(), 1.0);
/// ```
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(AnalysisError::LengthMismatch {
            x: predicted.len(),
            y: actual.len(),
        });
    }
    if actual.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mu = mean(actual);

    // Decided on the values themselves: the mean of identical values need not
    // be exact, so SS_tot can come out tiny but non-zero
    if actual.iter().all(|&y| y == actual[0]) {
        let max_residual = actual
            .iter()
            .zip(predicted)
            .map(|(y, p)| (y - p).abs())
            .fold(0.0, f64::max);

        if max_residual <= CONSTANT_MATCH_TOLERANCE * actual[0].abs().max(1.0) {
            return Ok(1.0);
        }
        return Err(AnalysisError::DegenerateFit {
            mean: actual[0],
            max_residual,
        });
    }

    let ss_tot: f64 = actual.iter().map(|y| (y - mu).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    Ok(1.0 - ss_res / ss_tot)
}
