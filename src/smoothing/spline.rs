//! Not-a-knot cubic spline interpolation and index-grid resampling.

use crate::error::{DenoiseError, Result};

/// Resampling step used by the smoothing pipeline: half a sample.
pub const DEFAULT_RESAMPLE_FACTOR: f64 = 0.5;

/// Piecewise cubic interpolant with not-a-knot end conditions.
///
/// Stored as knot values plus second derivatives at each knot. Three knots
/// degenerate to the interpolating parabola, two to a straight line and one
/// to a constant. Evaluation outside the knot range extends the end pieces.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    second_derivs: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(x[i], y[i])`.
    ///
    /// # Errors
    /// * `EmptyData` when no points are given.
    /// * `DimensionMismatch` when `x` and `y` differ in length.
    /// * `InvalidParameter` when `x` is not strictly increasing or any value
    ///   is non-finite.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.is_empty() {
            return Err(DenoiseError::EmptyData);
        }
        if x.len() != y.len() {
            return Err(DenoiseError::DimensionMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(DenoiseError::InvalidParameter(
                "spline knots must be finite".into(),
            ));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DenoiseError::InvalidParameter(
                "spline abscissae must be strictly increasing".into(),
            ));
        }

        let second_derivs = match x.len() {
            1 | 2 => vec![0.0; x.len()],
            3 => {
                let h0 = x[1] - x[0];
                let h1 = x[2] - x[1];
                let curvature = 2.0 * ((y[2] - y[1]) / h1 - (y[1] - y[0]) / h0) / (h0 + h1);
                vec![curvature; 3]
            }
            _ => not_a_knot_second_derivatives(x, y)?,
        };

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            second_derivs,
        })
    }

    /// Fit a spline through `values` placed at abscissae `1, 2, ..., n`.
    pub fn from_index_grid(values: &[f64]) -> Result<Self> {
        let x: Vec<f64> = (1..=values.len()).map(|i| i as f64).collect();
        Self::new(&x, values)
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the spline has no knots. Always false for a constructed spline.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Knot abscissae.
    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    /// Evaluate the spline at `t`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        if n == 1 {
            return self.y[0];
        }

        let i = if t <= self.x[0] {
            0
        } else if t >= self.x[n - 1] {
            n - 2
        } else {
            self.x.partition_point(|&xk| xk <= t) - 1
        };

        let h = self.x[i + 1] - self.x[i];
        let a = self.x[i + 1] - t;
        let b = t - self.x[i];
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);

        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (self.y[i] / h - m0 * h / 6.0) * a
            + (self.y[i + 1] / h - m1 * h / 6.0) * b
    }

    /// Evaluate at every point of `ts`.
    pub fn evaluate_many(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }
}

/// Second derivatives for four or more knots.
///
/// Interior rows are the usual C2 continuity equations. The not-a-knot rows
/// (continuous third derivative across the second and penultimate knots) are
/// eliminated into the first and last interior rows, leaving a diagonally
/// dominant tridiagonal system in `M_1..M_{n-2}`.
fn not_a_knot_second_derivatives(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slope: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let m = n - 2;
    let mut sub = vec![0.0; m];
    let mut diag = vec![0.0; m];
    let mut sup = vec![0.0; m];
    let mut rhs = vec![0.0; m];

    for k in 0..m {
        let i = k + 1;
        sub[k] = h[i - 1];
        diag[k] = 2.0 * (h[i - 1] + h[i]);
        sup[k] = h[i];
        rhs[k] = 6.0 * (slope[i] - slope[i - 1]);
    }

    // M_0 = ((h0 + h1) M_1 - h0 M_2) / h1
    let (h0, h1) = (h[0], h[1]);
    diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
    sup[0] = (h1 * h1 - h0 * h0) / h1;

    // M_{n-1} = ((a + b) M_{n-2} - b M_{n-3}) / a
    let (a, b) = (h[n - 3], h[n - 2]);
    diag[m - 1] = (a + b) * (2.0 * a + b) / a;
    sub[m - 1] = (a * a - b * b) / a;

    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

    let mut second = Vec::with_capacity(n);
    second.push(((h0 + h1) * interior[0] - h0 * interior[1]) / h1);
    second.extend_from_slice(&interior);
    second.push(((a + b) * interior[m - 1] - b * interior[m - 2]) / a);
    Ok(second)
}

/// Thomas algorithm. `sub[0]` and `sup[len - 1]` are ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    let mut pivot = diag[0];
    for i in 0..n {
        if i > 0 {
            pivot = diag[i] - sub[i] * c[i - 1];
        }
        if pivot == 0.0 || !pivot.is_finite() {
            return Err(DenoiseError::ComputationError("singular spline system".into()));
        }
        c[i] = if i + 1 < n { sup[i] / pivot } else { 0.0 };
        let carried = if i > 0 { sub[i] * d[i - 1] } else { 0.0 };
        d[i] = (rhs[i] - carried) / pivot;
    }

    for i in (0..n.saturating_sub(1)).rev() {
        d[i] -= c[i] * d[i + 1];
    }
    Ok(d)
}

/// Check a resampling factor: finite, in `(0, 1]` with an integral reciprocal.
///
/// Returns the reciprocal (the number of fine-grid points per sample).
pub fn resample_stride(factor: f64) -> Result<usize> {
    if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
        return Err(DenoiseError::InvalidSmoothingConfig(format!(
            "resample factor must be in (0, 1], got {}",
            factor
        )));
    }
    let inverse = 1.0 / factor;
    let stride = inverse.round();
    if (inverse - stride).abs() > 1e-9 {
        return Err(DenoiseError::InvalidSmoothingConfig(format!(
            "resample factor {} must be the reciprocal of an integer",
            factor
        )));
    }
    Ok(stride as usize)
}

/// Evaluate the index-grid spline of `values` on the fine grid
/// `1, 1 + factor, 1 + 2 * factor, ...` strictly below `n + 1`.
///
/// The grid has `n / factor` points.
///
/// # Example
/// ```
/// use epidenoise::smoothing::upsample;
///
/// let fine = upsample(&[0.0, 1.0, 4.0, 9.0], 0.5).unwrap();
/// assert_eq!(fine.len(), 8);
/// // Half-sample points follow the interpolating cubic.
/// assert!((fine[1] - 0.25).abs() < 1e-9);
/// ```
pub fn upsample(values: &[f64], factor: f64) -> Result<Vec<f64>> {
    let stride = resample_stride(factor)?;
    let spline = CubicSpline::from_index_grid(values)?;
    let points = values.len() * stride;
    Ok((0..points)
        .map(|k| spline.evaluate(1.0 + k as f64 / stride as f64))
        .collect())
}

/// Upsample `values` onto the fine grid and keep every `1 / factor`-th point.
///
/// The kept points are the original knot positions, so the output has the
/// input length and matches it up to rounding.
pub fn resample_round_trip(values: &[f64], factor: f64) -> Result<Vec<f64>> {
    let stride = resample_stride(factor)?;
    let fine = upsample(values, factor)?;
    Ok(fine.into_iter().step_by(stride).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interpolates_knots() {
        let x = [0.0, 1.0, 2.5, 3.0, 4.5, 6.0];
        let y = [1.0, -2.0, 0.5, 3.0, 2.0, -1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert_relative_eq!(spline.evaluate(*xi), *yi, epsilon = 1e-12);
        }
        assert_eq!(spline.len(), 6);
        assert_eq!(spline.knots(), &x);
    }

    #[test]
    fn reproduces_cubic_polynomials() {
        // Not-a-knot splines are exact for cubics, including extrapolation.
        let f = |t: f64| 0.5 * t * t * t - 2.0 * t * t + t + 3.0;
        let x: Vec<f64> = (0..7).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&t| f(t)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        for t in [0.25, 1.5, 2.75, 4.1, 5.9, -0.5, 6.5] {
            assert_relative_eq!(spline.evaluate(t), f(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn four_knots_give_single_cubic() {
        let f = |t: f64| t * t * t - t;
        let x = [1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|&t| f(t)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert_relative_eq!(spline.evaluate(1.5), f(1.5), epsilon = 1e-9);
        assert_relative_eq!(spline.evaluate(3.5), f(3.5), epsilon = 1e-9);
    }

    #[test]
    fn uneven_knots_satisfy_continuity_and_end_conditions() {
        let x = [0.0, 0.3, 1.7, 2.0, 3.5, 3.6, 5.0, 8.0];
        let y = [2.0, -1.0, 0.5, 4.0, 3.0, 3.2, -2.0, 1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        let m = &spline.second_derivs;
        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        for i in 1..n - 1 {
            let lhs = h[i - 1] * m[i - 1] + 2.0 * (h[i - 1] + h[i]) * m[i] + h[i] * m[i + 1];
            let rhs = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
            assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
        }
        // Third derivative continuous across the second and penultimate knots.
        assert_relative_eq!((m[1] - m[0]) / h[0], (m[2] - m[1]) / h[1], epsilon = 1e-9);
        assert_relative_eq!(
            (m[n - 2] - m[n - 3]) / h[n - 3],
            (m[n - 1] - m[n - 2]) / h[n - 2],
            epsilon = 1e-9
        );
    }

    #[test]
    fn tridiagonal_solver_matches_direct_solution() {
        // [4 1 0; 1 4 1; 0 1 4] x = [5, 6, 5] has x = [1, 1, 1].
        let x = solve_tridiagonal(
            &[0.0, 1.0, 1.0],
            &[4.0, 4.0, 4.0],
            &[1.0, 1.0, 0.0],
            &[5.0, 6.0, 5.0],
        )
        .unwrap();
        for v in x {
            assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        }
        assert!(matches!(
            solve_tridiagonal(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0], &[1.0, 1.0]),
            Err(DenoiseError::ComputationError(_))
        ));
    }

    #[test]
    fn degenerate_knot_counts() {
        let one = CubicSpline::new(&[2.0], &[5.0]).unwrap();
        assert_eq!(one.evaluate(-10.0), 5.0);
        assert_eq!(one.evaluate(2.0), 5.0);

        let two = CubicSpline::new(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert_relative_eq!(two.evaluate(1.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(two.evaluate(3.0), 7.0, epsilon = 1e-12);

        // Parabola through (0, 0), (1, 1), (3, 9) is t^2.
        let three = CubicSpline::new(&[0.0, 1.0, 3.0], &[0.0, 1.0, 9.0]).unwrap();
        for t in [0.5, 2.0, 2.5, 4.0] {
            assert_relative_eq!(three.evaluate(t), t * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_knots() {
        assert_eq!(CubicSpline::new(&[], &[]).unwrap_err(), DenoiseError::EmptyData);
        assert_eq!(
            CubicSpline::new(&[1.0, 2.0], &[1.0]).unwrap_err(),
            DenoiseError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
        assert!(matches!(
            CubicSpline::new(&[1.0, 1.0, 2.0], &[0.0, 0.0, 0.0]),
            Err(DenoiseError::InvalidParameter(_))
        ));
        assert!(matches!(
            CubicSpline::new(&[1.0, 2.0], &[0.0, f64::INFINITY]),
            Err(DenoiseError::InvalidParameter(_))
        ));
    }

    #[test]
    fn resample_stride_validation() {
        assert_eq!(resample_stride(0.5).unwrap(), 2);
        assert_eq!(resample_stride(1.0).unwrap(), 1);
        assert_eq!(resample_stride(0.25).unwrap(), 4);
        assert_eq!(resample_stride(1.0 / 3.0).unwrap(), 3);
        for bad in [0.0, -0.5, 1.5, 0.3, f64::NAN] {
            assert!(matches!(
                resample_stride(bad),
                Err(DenoiseError::InvalidSmoothingConfig(_))
            ));
        }
    }

    #[test]
    fn upsample_grid_length_and_midpoints() {
        let values: Vec<f64> = (1..=6).map(|i| (i * i) as f64).collect();
        let fine = upsample(&values, 0.5).unwrap();
        assert_eq!(fine.len(), 12);
        // Quadratic data is reproduced exactly between knots.
        assert_relative_eq!(fine[1], 1.5 * 1.5, epsilon = 1e-9);
        assert_relative_eq!(fine[11], 6.5 * 6.5, epsilon = 1e-9);
    }

    #[test]
    fn round_trip_keeps_length_and_values() {
        let values = vec![3.0, 7.5, -1.0, 4.0, 4.0, 10.0, 2.0];
        for factor in [1.0, 0.5, 0.25] {
            let out = resample_round_trip(&values, factor).unwrap();
            assert_eq!(out.len(), values.len());
            for (a, b) in out.iter().zip(values.iter()) {
                assert_relative_eq!(a, b, epsilon = 1e-9);
            }
        }
        assert_eq!(resample_round_trip(&[2.0], 0.5).unwrap(), vec![2.0]);
    }
}
