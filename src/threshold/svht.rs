//! Optimal singular value hard threshold (Gavish & Donoho, 2014).
//!
//! For a low-rank signal observed in white noise, the asymptotically optimal
//! hard threshold on singular values is `omega(beta) * scale`, where `beta` is
//! the matrix aspect ratio. With a known noise level the scale is
//! `sqrt(n) * sigma`; with an unknown noise level it is the median singular
//! value and `omega` is corrected by the Marchenko–Pastur median.

use super::marchenko_pastur::median_marchenko_pastur;
use crate::error::{DenoiseError, Result};
use crate::utils::median;

/// Whether the noise level of the observations is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseLevel {
    /// Noise standard deviation is supplied externally.
    Known,
    /// Noise level is estimated from the median singular value.
    #[default]
    Unknown,
}

/// Aspect ratio `min(m, n) / max(m, n)` of an `m x n` matrix.
///
/// Returns NaN when either dimension is zero.
pub fn aspect_ratio(m: usize, n: usize) -> f64 {
    let (small, large) = if m <= n { (m, n) } else { (n, m) };
    if small == 0 {
        return f64::NAN;
    }
    small as f64 / large as f64
}

fn check_beta(beta: f64) -> Result<()> {
    if !beta.is_finite() || beta <= 0.0 || beta > 1.0 {
        return Err(DenoiseError::InvalidAspectRatio(beta));
    }
    Ok(())
}

/// Threshold coefficient `lambda*(beta)` for a known noise level.
///
/// `sqrt(2(beta + 1) + 8 beta / (beta + 1 + sqrt(beta^2 + 14 beta + 1)))`
///
/// # Example
/// ```
/// use epidenoise::threshold::optimal_svht_coef_sigma_known;
///
/// // Square matrices: 4 / sqrt(3)
/// let coef = optimal_svht_coef_sigma_known(1.0).unwrap();
/// assert!((coef - 4.0 / 3.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn optimal_svht_coef_sigma_known(beta: f64) -> Result<f64> {
    check_beta(beta)?;
    let w = (8.0 * beta) / (beta + 1.0 + (beta * beta + 14.0 * beta + 1.0).sqrt());
    Ok((2.0 * (beta + 1.0) + w).sqrt())
}

/// Threshold coefficient `omega(beta)` for an unknown noise level.
///
/// `lambda*(beta) / sqrt(median of Marchenko–Pastur(beta))`, meant to be
/// multiplied by the median singular value.
pub fn optimal_svht_coef_sigma_unknown(beta: f64) -> Result<f64> {
    let coef = optimal_svht_coef_sigma_known(beta)?;
    let mp_median = median_marchenko_pastur(beta)?;
    Ok(coef / mp_median.sqrt())
}

/// Threshold coefficient for the given noise model.
pub fn optimal_svht_coef(beta: f64, noise: NoiseLevel) -> Result<f64> {
    match noise {
        NoiseLevel::Known => optimal_svht_coef_sigma_known(beta),
        NoiseLevel::Unknown => optimal_svht_coef_sigma_unknown(beta),
    }
}

/// Hard threshold on `singular_values` with the noise scale estimated as
/// their median.
///
/// # Errors
/// `EmptyData` for an empty spectrum, `InvalidAspectRatio` for a bad `beta`.
pub fn svht_threshold(singular_values: &[f64], beta: f64) -> Result<f64> {
    if singular_values.is_empty() {
        return Err(DenoiseError::EmptyData);
    }
    let omega = optimal_svht_coef_sigma_unknown(beta)?;
    Ok(omega * median(singular_values))
}
