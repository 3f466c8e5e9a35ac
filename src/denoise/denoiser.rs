//! Hankel SVD denoiser.

use super::rank::{select_rank, RankSelection};
use super::svd::SpectralDecomposition;
use crate::embedding::{diagonal_average, HankelMatrix};
use crate::error::{DenoiseError, Result};
use tracing::debug;

/// Output of [`SvdDenoiser::denoise`].
#[derive(Debug, Clone)]
pub struct DenoiseResult {
    /// Denoised series, same length as the input.
    pub denoised: Vec<f64>,
    /// Truncation rank used. Zero yields an all-zero series.
    pub rank: usize,
    /// Hard threshold applied when the rank was selected automatically.
    pub threshold: Option<f64>,
    /// Singular values of the trajectory matrix, largest first.
    pub singular_values: Vec<f64>,
    /// Aspect ratio of the trajectory matrix.
    pub aspect_ratio: f64,
}

impl DenoiseResult {
    /// Difference between the input and the denoised series.
    pub fn residuals(&self, series: &[f64]) -> Vec<f64> {
        series
            .iter()
            .zip(self.denoised.iter())
            .map(|(x, d)| x - d)
            .collect()
    }

    /// Share of spectral energy (sum of squared singular values) retained.
    pub fn retained_energy(&self) -> f64 {
        let total: f64 = self.singular_values.iter().map(|s| s * s).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let kept: f64 = self
            .singular_values
            .iter()
            .take(self.rank)
            .map(|s| s * s)
            .sum();
        kept / total
    }
}

/// Removes noise from a series by truncating the SVD of its Hankel embedding.
///
/// The series is embedded with a sliding window, the trajectory matrix is
/// decomposed, every singular triad past the selected rank is discarded and
/// the series is recovered by anti-diagonal averaging.
///
/// # Example
/// ```
/// use epidenoise::denoise::SvdDenoiser;
///
/// let series: Vec<f64> = (0..60)
///     .map(|i| (i as f64 * 0.3).sin() + if i % 2 == 0 { 0.05 } else { -0.05 })
///     .collect();
///
/// let result = SvdDenoiser::new(12).denoise(&series).unwrap();
/// assert_eq!(result.denoised.len(), series.len());
/// assert!(result.rank >= 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdDenoiser {
    window: usize,
    rank: RankSelection,
}

impl SvdDenoiser {
    /// Denoiser with the given embedding window and automatic rank selection.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            rank: RankSelection::Auto,
        }
    }

    /// Use a fixed truncation rank.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = RankSelection::Fixed(rank);
        self
    }

    /// Set the rank selection strategy.
    pub fn with_rank_selection(mut self, rank: RankSelection) -> Self {
        self.rank = rank;
        self
    }

    /// Embedding window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rank selection strategy.
    pub fn rank_selection(&self) -> RankSelection {
        self.rank
    }

    /// Denoise a series.
    ///
    /// # Errors
    /// * `EmptyData` for an empty series.
    /// * `InvalidParameter` if the series holds NaN or infinite values.
    /// * `InvalidWindow` if the window is zero or longer than the series.
    /// * `InvalidRank` if a fixed rank is outside `1..=window`.
    pub fn denoise(&self, series: &[f64]) -> Result<DenoiseResult> {
        if series.is_empty() {
            return Err(DenoiseError::EmptyData);
        }
        if series.iter().any(|x| !x.is_finite()) {
            return Err(DenoiseError::InvalidParameter(
                "series contains non-finite values".into(),
            ));
        }
        // Every precondition is checked before the decomposition; the window
        // first, since the rank bound depends on it.
        let hankel = HankelMatrix::new(series, self.window)?;
        self.rank.validate(self.window)?;

        let shape = hankel.shape();
        let aspect_ratio = hankel.aspect_ratio();
        let svd = SpectralDecomposition::new(hankel.as_matrix())?;
        let decision = select_rank(svd.singular_values(), shape, self.rank)?;

        debug!(
            n = series.len(),
            window = self.window,
            beta = aspect_ratio,
            threshold = ?decision.threshold,
            rank = decision.rank,
            "svd denoise"
        );

        let denoised = diagonal_average(&svd.reconstruct(decision.rank));

        Ok(DenoiseResult {
            denoised,
            rank: decision.rank,
            threshold: decision.threshold,
            singular_values: svd.singular_values().to_vec(),
            aspect_ratio,
        })
    }
}

/// Denoise `series` with a Hankel embedding of length `window`.
///
/// With `rank = None` the truncation rank is selected by the optimal hard
/// threshold. Returns the denoised series and the rank used.
///
/// # Example
/// ```
/// use epidenoise::denoise;
///
/// let series = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let (denoised, rank) = denoise(&series, 3, Some(2)).unwrap();
/// assert_eq!(rank, 2);
/// assert!((denoised[4] - 5.0).abs() < 1e-9);
/// ```
pub fn denoise(series: &[f64], window: usize, rank: Option<usize>) -> Result<(Vec<f64>, usize)> {
    let result = SvdDenoiser::new(window)
        .with_rank_selection(RankSelection::from_option(rank))
        .denoise(series)?;
    Ok((result.denoised, result.rank))
}
