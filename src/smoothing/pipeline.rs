//! Savitzky–Golay smoothing followed by a spline resampling round trip.

use super::savgol::{validate_filter, SavitzkyGolay};
use super::spline::{resample_round_trip, resample_stride, DEFAULT_RESAMPLE_FACTOR};
use crate::error::{DenoiseError, Result};

/// Validated smoothing parameters.
///
/// All checks that do not depend on the series happen at construction, so a
/// config that exists is usable on any series at least `window_length` long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    window_length: usize,
    order: usize,
    resample_factor: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_length: 11,
            order: 3,
            resample_factor: DEFAULT_RESAMPLE_FACTOR,
        }
    }
}

impl SmoothingConfig {
    /// Build a config.
    ///
    /// # Errors
    /// `InvalidSmoothingConfig` if the window is zero or even, the order is
    /// not below the window, or the resample factor is not in `(0, 1]` with
    /// an integral reciprocal.
    pub fn new(window_length: usize, order: usize, resample_factor: f64) -> Result<Self> {
        validate_filter(window_length, order)?;
        resample_stride(resample_factor)?;

        Ok(Self {
            window_length,
            order,
            resample_factor,
        })
    }

    /// Savitzky–Golay window length.
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Savitzky–Golay polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Spline resampling step.
    pub fn resample_factor(&self) -> f64 {
        self.resample_factor
    }
}

/// Reusable smoother holding precomputed filter weights.
///
/// # Example
/// ```
/// use epidenoise::smoothing::{Smoother, SmoothingConfig};
///
/// let smoother = Smoother::new(SmoothingConfig::default()).unwrap();
/// let series: Vec<f64> = (0..30).map(|i| i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
/// let out = smoother.smooth(&series).unwrap();
/// assert_eq!(out.len(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct Smoother {
    config: SmoothingConfig,
    filter: SavitzkyGolay,
}

impl Smoother {
    /// Create a smoother from a validated config.
    pub fn new(config: SmoothingConfig) -> Result<Self> {
        let filter = SavitzkyGolay::new(config.window_length, config.order)?;
        Ok(Self { config, filter })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Smooth `series`, keeping its length.
    ///
    /// # Errors
    /// * `EmptyData` for an empty series.
    /// * `InvalidSmoothingConfig` when the window exceeds the series length.
    pub fn smooth(&self, series: &[f64]) -> Result<Vec<f64>> {
        if series.is_empty() {
            return Err(DenoiseError::EmptyData);
        }
        let filtered = self.filter.apply(series)?;
        resample_round_trip(&filtered, self.config.resample_factor)
    }
}

/// Smooth `series` with a Savitzky–Golay filter and a cubic-spline
/// resampling round trip. Output has the input length.
///
/// # Example
/// ```
/// use epidenoise::smooth;
///
/// let series: Vec<f64> = (0..20).map(|i| (i * i) as f64).collect();
/// let out = smooth(&series, 5, 2, 0.5).unwrap();
/// // Quadratics survive both stages.
/// assert!(out.iter().zip(&series).all(|(a, b)| (a - b).abs() < 1e-6));
/// ```
pub fn smooth(
    series: &[f64],
    window_length: usize,
    order: usize,
    resample_factor: f64,
) -> Result<Vec<f64>> {
    let config = SmoothingConfig::new(window_length, order, resample_factor)?;
    Smoother::new(config)?.smooth(series)
}
