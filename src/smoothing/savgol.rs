//! Savitzky–Golay local polynomial filter.
//!
//! Each output sample is the value at that position of a degree-`order`
//! polynomial fitted by least squares to the surrounding `window_length`
//! samples. Interior samples use the centred window. The first and last
//! `window_length / 2` samples cannot be centred; for those a single
//! polynomial is fitted to the first (or last) `window_length` samples and
//! evaluated at each edge position, so the output keeps the input length and
//! needs no padding.

use crate::error::{DenoiseError, Result};
use nalgebra::DMatrix;

/// Savitzky–Golay filter with precomputed projection weights.
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window_length: usize,
    order: usize,
    /// `window_length x window_length` least-squares projection. Row `r`
    /// holds the weights producing the fitted value at window position `r`.
    projection: DMatrix<f64>,
}

impl SavitzkyGolay {
    /// Create a filter.
    ///
    /// # Errors
    /// `InvalidSmoothingConfig` if `window_length` is zero or even, or
    /// `order >= window_length`.
    ///
    /// # Example
    /// ```
    /// use epidenoise::smoothing::SavitzkyGolay;
    ///
    /// let sg = SavitzkyGolay::new(5, 2).unwrap();
    /// // A quadratic passes through unchanged.
    /// let y: Vec<f64> = (0..8).map(|i| (i * i) as f64).collect();
    /// let out = sg.apply(&y).unwrap();
    /// assert!(out.iter().zip(&y).all(|(a, b)| (a - b).abs() < 1e-9));
    /// ```
    pub fn new(window_length: usize, order: usize) -> Result<Self> {
        validate_filter(window_length, order)?;

        let half = window_length / 2;
        // Positions scaled to [-1, 1]; the projection does not depend on scale.
        let scale = if half == 0 { 1.0 } else { half as f64 };
        let vandermonde = DMatrix::from_fn(window_length, order + 1, |i, k| {
            ((i as f64 - half as f64) / scale).powi(k as i32)
        });

        let pinv = vandermonde
            .clone()
            .pseudo_inverse(1e-12)
            .map_err(|e| DenoiseError::ComputationError(e.to_string()))?;
        let projection = &vandermonde * pinv;

        Ok(Self {
            window_length,
            order,
            projection,
        })
    }

    /// Window length.
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Convolution weights for the centred window.
    pub fn coefficients(&self) -> Vec<f64> {
        let half = self.window_length / 2;
        self.projection.row(half).iter().copied().collect()
    }

    /// Filter `data`, returning a series of the same length.
    ///
    /// # Errors
    /// `InvalidSmoothingConfig` when `data` is shorter than the window.
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>> {
        let n = data.len();
        let w = self.window_length;
        if w > n {
            return Err(DenoiseError::InvalidSmoothingConfig(format!(
                "window length {} exceeds series length {}",
                w, n
            )));
        }

        let half = w / 2;
        let weighted = |row: usize, start: usize| -> f64 {
            self.projection
                .row(row)
                .iter()
                .zip(&data[start..start + w])
                .map(|(c, x)| c * x)
                .sum()
        };

        let mut out = vec![0.0; n];
        for (i, value) in out.iter_mut().enumerate() {
            *value = if i < half {
                weighted(i, 0)
            } else if i + half >= n {
                weighted(i + w - n, n - w)
            } else {
                weighted(half, i - half)
            };
        }

        Ok(out)
    }
}

/// Check a window length and polynomial order pair.
pub(super) fn validate_filter(window_length: usize, order: usize) -> Result<()> {
    if window_length == 0 || window_length.is_multiple_of(2) {
        return Err(DenoiseError::InvalidSmoothingConfig(format!(
            "window length must be a positive odd integer, got {}",
            window_length
        )));
    }
    if order >= window_length {
        return Err(DenoiseError::InvalidSmoothingConfig(format!(
            "polynomial order {} must be less than window length {}",
            order, window_length
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn classic_five_point_quadratic_coefficients() {
        // Savitzky & Golay (1964): [-3, 12, 17, 12, -3] / 35
        let sg = SavitzkyGolay::new(5, 2).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0].map(|c| c / 35.0);
        for (c, e) in sg.coefficients().iter().zip(expected.iter()) {
            assert_relative_eq!(c, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn eleven_point_cubic_coefficients() {
        // Cubic and quadratic share smoothing weights:
        // [-36, 9, 44, 69, 84, 89, 84, 69, 44, 9, -36] / 429
        let sg = SavitzkyGolay::new(11, 3).unwrap();
        let expected = [
            -36.0, 9.0, 44.0, 69.0, 84.0, 89.0, 84.0, 69.0, 44.0, 9.0, -36.0,
        ]
        .map(|c| c / 429.0);
        let coeffs = sg.coefficients();
        assert_eq!(coeffs.len(), 11);
        for (c, e) in coeffs.iter().zip(expected.iter()) {
            assert_relative_eq!(c, e, epsilon = 1e-12);
        }
        assert_relative_eq!(coeffs.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn polynomials_up_to_order_pass_through() {
        let sg = SavitzkyGolay::new(7, 3).unwrap();
        let cubic: Vec<f64> = (0..20)
            .map(|i| {
                let x = i as f64 * 0.5;
                0.2 * x * x * x - x * x + 3.0 * x - 7.0
            })
            .collect();
        let out = sg.apply(&cubic).unwrap();
        for (a, b) in out.iter().zip(cubic.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn edges_use_polynomial_fit_of_first_window() {
        let data = vec![2.0, 0.0, 5.0, 1.0, 7.0, 3.0, 4.0, 8.0];
        let sg = SavitzkyGolay::new(5, 1).unwrap();
        let out = sg.apply(&data).unwrap();

        // Straight-line least squares through (k, data[k]), k = 0..5.
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = &data[..5];
        let x_mean = 2.0;
        let y_mean = ys.iter().sum::<f64>() / 5.0;
        let slope = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum::<f64>()
            / xs.iter().map(|x| (x - x_mean).powi(2)).sum::<f64>();
        let line = |x: f64| y_mean + slope * (x - x_mean);

        assert_relative_eq!(out[0], line(0.0), epsilon = 1e-12);
        assert_relative_eq!(out[1], line(1.0), epsilon = 1e-12);
        // First centred sample agrees with the same fit at the window centre.
        assert_relative_eq!(out[2], line(2.0), epsilon = 1e-12);

        // Right edge: fit of the last five samples, evaluated at positions 3 and 4.
        let tail = &data[3..];
        let t_mean = tail.iter().sum::<f64>() / 5.0;
        let t_slope = xs
            .iter()
            .zip(tail)
            .map(|(x, y)| (x - x_mean) * (y - t_mean))
            .sum::<f64>()
            / 10.0;
        assert_relative_eq!(out[6], t_mean + t_slope * 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[7], t_mean + t_slope * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn window_equal_to_length_is_single_fit() {
        let data = vec![1.0, 4.0, 2.0];
        let sg = SavitzkyGolay::new(3, 0).unwrap();
        let out = sg.apply(&data).unwrap();
        for v in out {
            assert_relative_eq!(v, 7.0 / 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn unit_window_is_identity() {
        let data = vec![3.0, -1.0, 2.5];
        let sg = SavitzkyGolay::new(1, 0).unwrap();
        assert_eq!(sg.apply(&data).unwrap().len(), 3);
        for (a, b) in sg.apply(&data).unwrap().iter().zip(&data) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(matches!(
            SavitzkyGolay::new(4, 2),
            Err(DenoiseError::InvalidSmoothingConfig(_))
        ));
        assert!(matches!(
            SavitzkyGolay::new(0, 0),
            Err(DenoiseError::InvalidSmoothingConfig(_))
        ));
        assert!(matches!(
            SavitzkyGolay::new(5, 5),
            Err(DenoiseError::InvalidSmoothingConfig(_))
        ));

        let sg = SavitzkyGolay::new(5, 2).unwrap();
        assert!(matches!(
            sg.apply(&[1.0, 2.0, 3.0]),
            Err(DenoiseError::InvalidSmoothingConfig(_))
        ));
        assert_eq!(sg.window_length(), 5);
        assert_eq!(sg.order(), 2);
    }
}
