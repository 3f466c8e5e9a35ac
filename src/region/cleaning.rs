//! Raw series cleaning before denoising.

use crate::error::{DenoiseError, Result};

/// Cleaning rules for one field.
///
/// # Example
/// ```
/// use epidenoise::region::{clean_series, CleaningConfig};
///
/// let config = CleaningConfig::default()
///     .with_positive(true)
///     .with_forbidden_range(-999.0, -999.0);
/// let cleaned = clean_series(&[1.5, f64::NAN, -2.0, 4.0], &config).unwrap();
/// assert_eq!(cleaned, vec![1.5, 0.0, 0.0, 4.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningConfig {
    /// Clamp negative values to zero.
    pub positive: bool,
    /// Inclusive `[lo, hi]` ranges whose values are replaced with zero.
    pub forbidden_ranges: Vec<(f64, f64)>,
}

impl CleaningConfig {
    /// Set whether the field must be non-negative.
    pub fn with_positive(mut self, positive: bool) -> Self {
        self.positive = positive;
        self
    }

    /// Add a forbidden inclusive range.
    pub fn with_forbidden_range(mut self, lo: f64, hi: f64) -> Self {
        self.forbidden_ranges.push((lo, hi));
        self
    }

    /// Check every forbidden range.
    ///
    /// # Errors
    /// `InvalidParameter` for a range with a NaN bound or `lo > hi`.
    pub fn validate(&self) -> Result<()> {
        for &(lo, hi) in &self.forbidden_ranges {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(DenoiseError::InvalidParameter(format!(
                    "forbidden range must satisfy lo <= hi, got [{}, {}]",
                    lo, hi
                )));
            }
        }
        Ok(())
    }
}

/// Clean a raw series.
///
/// NaN and infinite values become zero. With `positive`, negative values are
/// clamped to zero. Values inside any forbidden range become zero.
pub fn clean_series(series: &[f64], config: &CleaningConfig) -> Result<Vec<f64>> {
    config.validate()?;

    Ok(series
        .iter()
        .map(|&x| {
            if !x.is_finite() || (config.positive && x < 0.0) {
                return 0.0;
            }
            if config
                .forbidden_ranges
                .iter()
                .any(|&(lo, hi)| x >= lo && x <= hi)
            {
                return 0.0;
            }
            x
        })
        .collect())
}
