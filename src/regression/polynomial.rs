// Least-squares polynomial fitting in double precision
//
// The design matrix is built on a shifted and scaled abscissa
// t = (x - shift) / scale, which maps the inputs onto [-1, 1] and keeps the
// Vandermonde columns comparable in magnitude. The system is solved with
// nalgebra's SVD, which also yields the numerical rank.
//
// Coefficients are reported in the plain x basis (highest degree first), but
// predictions are evaluated in the scaled basis where rounding is smallest.

use crate::error::{AnalysisError, Result};
use nalgebra::{DMatrix, DVector};

/// A polynomial stored in the scaled basis it was fitted in
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledPolynomial {
    /// Coefficients of t^0 .. t^d
    coefficients: Vec<f64>,
    shift: f64,
    scale: f64,
}

impl ScaledPolynomial {
    /// Polynomial degree
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate at `x` using Horner's scheme in the scaled basis
    pub fn evaluate(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        horner_ascending(&self.coefficients, t)
    }

    /// Coefficients in the x basis, highest degree first
    ///
    /// Expands `sum_k c_k ((x - s) / h)^k` binomially.
    pub fn coefficients_highest_first(&self) -> Vec<f64> {
        let n = self.coefficients.len();
        let mut ascending = vec![0.0; n];

        for (k, &c) in self.coefficients.iter().enumerate() {
            let inv_scale_k = self.scale.powi(k as i32).recip();
            let mut binom = 1.0;
            for (j, slot) in ascending.iter_mut().enumerate().take(k + 1) {
                // binom == C(k, j)
                *slot += c * binom * (-self.shift).powi((k - j) as i32) * inv_scale_k;
                binom = binom * (k - j) as f64 / (j + 1) as f64;
            }
        }

        ascending.reverse();
        ascending
    }
}

/// Evaluate a polynomial given highest-degree-first coefficients
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

fn horner_ascending(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

/// Number of distinct abscissae (exact comparison)
pub fn distinct_count(x: &[f64]) -> usize {
    let mut sorted = x.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Singular values below this fraction of the largest are treated as zero
const RELATIVE_RANK_TOLERANCE: f64 = 1e-12;

/// Least-squares fit of `y` against `x` at the given degree
///
/// Callers validate lengths and degree; this only guards against a design
/// matrix without enough distinct points to determine every coefficient.
pub fn least_squares(x: &[f64], y: &[f64], degree: usize) -> Result<ScaledPolynomial> {
    let cols = degree + 1;
    let distinct = distinct_count(x);
    if distinct < cols {
        return Err(AnalysisError::InsufficientData {
            required: cols,
            actual: distinct,
        });
    }

    let n = x.len();
    let shift = x.iter().sum::<f64>() / n as f64;
    let spread = x.iter().map(|v| (v - shift).abs()).fold(0.0, f64::max);
    let scale = if spread > 0.0 { spread } else { 1.0 };

    let design = DMatrix::from_fn(n, cols, |i, j| ((x[i] - shift) / scale).powi(j as i32));
    let target = DVector::from_column_slice(y);

    let svd = design.svd(true, true);
    let tolerance = RELATIVE_RANK_TOLERANCE * svd.singular_values.max();
    let rank = svd.rank(tolerance);
    if rank < cols {
        return Err(AnalysisError::InsufficientData {
            required: cols,
            actual: rank,
        });
    }

    let solution = svd
        .solve(&target, tolerance)
        .map_err(|_| AnalysisError::InsufficientData {
            required: cols,
            actual: rank,
        })?;

    Ok(ScaledPolynomial {
        coefficients: solution.iter().copied().collect(),
        shift,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() <= tol, "{} != {} (tol {})", a, b, tol);
    }

    #[test]
    fn test_evaluate_highest_first() {
        // 2x^2 - 3x + 1
        assert_eq!(evaluate(&[2.0, -3.0, 1.0], 2.0), 3.0);
        assert_eq!(evaluate(&[], 2.0), 0.0);
    }

    #[test]
    fn test_line_through_two_points() {
        let p = least_squares(&[1.0, 3.0], &[2.0, 6.0], 1).unwrap();
        let c = p.coefficients_highest_first();
        assert_close(c[0], 2.0, 1e-12);
        assert_close(c[1], 0.0, 1e-12);
    }

    #[test]
    fn test_least_squares_line_minimizes_residuals() {
        // Classic example: best line through (0,1), (1,3), (2,2) is y = 0.5x + 1.5
        let p = least_squares(&[0.0, 1.0, 2.0], &[1.0, 3.0, 2.0], 1).unwrap();
        let c = p.coefficients_highest_first();
        assert_close(c[0], 0.5, 1e-12);
        assert_close(c[1], 1.5, 1e-12);
    }

    #[test]
    fn test_cubic_recovered_with_large_offset() {
        let x: Vec<f64> = (0..50).map(|i| 10_000.0 + 500.0 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 1e-12 * v * v * v + 3.0).collect();
        let p = least_squares(&x, &y, 3).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert_close(p.evaluate(*xi), *yi, 1e-9 * yi.abs().max(1.0));
        }
    }

    #[test]
    fn test_degree_zero_is_mean() {
        let p = least_squares(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0], 0).unwrap();
        assert_close(p.evaluate(100.0), 5.0, 1e-12);
        assert_eq!(p.degree(), 0);
    }

    #[test]
    fn test_repeated_abscissae_are_insufficient() {
        let err = least_squares(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0], 1).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                required: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_distinct_count() {
        assert_eq!(distinct_count(&[1.0, 1.0, 2.0, 3.0, 3.0]), 3);
        assert_eq!(distinct_count(&[]), 0);
    }
}
