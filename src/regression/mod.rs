// Polynomial regression over benchmark series
//
// Fits runtime (or the harness's runtime derivative) against input size and
// scores the fit with the coefficient of determination. The degree is always
// supplied by the caller: a complexity hypothesis is tested, never inferred.
//
// Everything is computed in f64. Ill-conditioned requests (very high degree
// over a narrow input range) may yield unstable coefficients.

mod model;
mod polynomial;
mod score;

pub use model::{fit, ComplexityModel, FitResult};
pub use polynomial::evaluate;
pub use score::{mean, r_squared, CONSTANT_MATCH_TOLERANCE};
