//! Marchenko–Pastur distribution for rectangular random matrices.
//!
//! For a `m x n` matrix with i.i.d. unit-variance noise entries and aspect
//! ratio `beta = m / n <= 1`, the eigenvalues of the scaled Gram matrix follow
//! the Marchenko–Pastur law supported on `[(1 - sqrt(beta))^2, (1 + sqrt(beta))^2]`.

use crate::error::{DenoiseError, Result};
use crate::utils::{integrate, linspace, QuadratureConfig};
use std::f64::consts::PI;
use tracing::trace;

/// Bisection stops once the bracket is at most this wide.
pub const MEDIAN_TOLERANCE: f64 = 0.001;

/// Number of evenly spaced samples per bisection round.
pub const MEDIAN_GRID_POINTS: usize = 5;

/// Termination guard for the bisection; the tolerance is reached long before.
const MAX_BISECTION_ROUNDS: usize = 64;

/// Marchenko–Pastur distribution with aspect ratio `beta`.
#[derive(Debug, Clone)]
pub struct MarchenkoPastur {
    beta: f64,
    lower: f64,
    upper: f64,
    quadrature: QuadratureConfig,
}

impl MarchenkoPastur {
    /// Create the distribution for `beta` in `(0, 1]`.
    ///
    /// # Errors
    /// `InvalidAspectRatio` when `beta` is not finite or outside `(0, 1]`.
    pub fn new(beta: f64) -> Result<Self> {
        if !beta.is_finite() || beta <= 0.0 || beta > 1.0 {
            return Err(DenoiseError::InvalidAspectRatio(beta));
        }
        let root = beta.sqrt();
        Ok(Self {
            beta,
            lower: (1.0 - root).powi(2),
            upper: (1.0 + root).powi(2),
            quadrature: QuadratureConfig::default(),
        })
    }

    /// Override the quadrature settings used for tail integrals.
    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Self {
        self.quadrature = config;
        self
    }

    /// Aspect ratio.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Support `[lower, upper]` of the density.
    pub fn support(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Probability density at `t`; zero outside the open support.
    pub fn density(&self, t: f64) -> f64 {
        let q = (self.upper - t) * (t - self.lower);
        if q > 0.0 {
            q.sqrt() / (self.beta * t) / (2.0 * PI)
        } else {
            0.0
        }
    }

    /// Upper-tail mass `∫_{x0}^{upper} density(t) dt`.
    pub fn upper_tail(&self, x0: f64) -> f64 {
        if x0 >= self.upper {
            return 0.0;
        }
        // The density vanishes below the support.
        let start = x0.max(self.lower);
        integrate(|t| self.density(t), start, self.upper, &self.quadrature).value
    }

    /// Cumulative distribution `1 - upper_tail(x)`.
    pub fn cdf(&self, x: f64) -> f64 {
        1.0 - self.upper_tail(x)
    }

    /// Median of the distribution.
    ///
    /// Uses a coarse grid bisection: each round samples the CDF at
    /// [`MEDIAN_GRID_POINTS`] evenly spaced points of the current bracket,
    /// moves the lower bound to the largest sample below one half and the
    /// upper bound to the smallest sample above one half. Rounds continue
    /// while a bound was updated and the bracket is wider than
    /// [`MEDIAN_TOLERANCE`]; the bracket midpoint is returned. Thresholds
    /// depend on this exact scheme down to the last digits.
    pub fn median(&self) -> f64 {
        let mut lo = self.lower;
        let mut hi = self.upper;
        let mut changed = true;
        let mut rounds = 0;

        while changed && hi - lo > MEDIAN_TOLERANCE && rounds < MAX_BISECTION_ROUNDS {
            changed = false;
            rounds += 1;

            let xs = linspace(lo, hi, MEDIAN_GRID_POINTS);
            let ys: Vec<f64> = xs.iter().map(|&x| self.cdf(x)).collect();

            let below = xs
                .iter()
                .zip(ys.iter())
                .filter(|(_, &y)| y < 0.5)
                .map(|(&x, _)| x)
                .fold(f64::NEG_INFINITY, f64::max);
            if below.is_finite() {
                lo = below;
                changed = true;
            }

            let above = xs
                .iter()
                .zip(ys.iter())
                .filter(|(_, &y)| y > 0.5)
                .map(|(&x, _)| x)
                .fold(f64::INFINITY, f64::min);
            if above.is_finite() {
                hi = above;
                changed = true;
            }

            trace!(round = rounds, lo, hi, "marchenko-pastur median bracket");
        }

        (lo + hi) / 2.0
    }
}

/// Median of the Marchenko–Pastur distribution with aspect ratio `beta`.
///
/// # Errors
/// `InvalidAspectRatio` when `beta` is outside `(0, 1]`.
///
/// # Example
/// ```
/// use epidenoise::threshold::median_marchenko_pastur;
///
/// let m = median_marchenko_pastur(1.0).unwrap();
/// assert!((m - 0.6528).abs() < 1e-3);
/// ```
pub fn median_marchenko_pastur(beta: f64) -> Result<f64> {
    Ok(MarchenkoPastur::new(beta)?.median())
}
