//! Truncation rank selection.

use crate::error::{DenoiseError, Result};
use crate::threshold::{aspect_ratio, svht_threshold};

/// How the truncation rank is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankSelection {
    /// Count of singular values above the optimal hard threshold.
    #[default]
    Auto,
    /// Caller-supplied rank in `1..=window`.
    Fixed(usize),
}

impl RankSelection {
    /// Build from an optional caller rank.
    pub fn from_option(rank: Option<usize>) -> Self {
        rank.map_or(Self::Auto, Self::Fixed)
    }

    /// Check a fixed rank against the embedding window.
    ///
    /// # Errors
    /// `InvalidRank` when a fixed rank is outside `1..=window`.
    pub fn validate(&self, window: usize) -> Result<()> {
        match *self {
            Self::Fixed(rank) if rank == 0 || rank > window => {
                Err(DenoiseError::InvalidRank { rank, window })
            }
            _ => Ok(()),
        }
    }
}

/// Outcome of rank selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankDecision {
    /// Number of leading triads to keep. Zero means the whole spectrum was
    /// judged to be noise.
    pub rank: usize,
    /// Hard threshold applied, when the rank was selected automatically.
    pub threshold: Option<f64>,
}

/// Select the truncation rank for a `shape.0 x shape.1` trajectory matrix.
///
/// `shape.1` is the embedding window. Automatic selection thresholds at
/// `omega(beta) * median(singular_values)` and keeps every value strictly
/// above it; a zero rank is returned as is.
///
/// # Errors
/// `InvalidRank` for a fixed rank outside `1..=window`, `EmptyData` for an
/// empty spectrum in automatic mode.
pub fn select_rank(
    singular_values: &[f64],
    shape: (usize, usize),
    selection: RankSelection,
) -> Result<RankDecision> {
    let window = shape.1;
    selection.validate(window)?;

    match selection {
        RankSelection::Fixed(rank) => Ok(RankDecision {
            rank,
            threshold: None,
        }),
        RankSelection::Auto => {
            let beta = aspect_ratio(shape.0, shape.1);
            let threshold = svht_threshold(singular_values, beta)?;
            let rank = singular_values.iter().filter(|&&s| s > threshold).count();
            Ok(RankDecision {
                rank,
                threshold: Some(threshold),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::optimal_svht_coef_sigma_unknown;

    #[test]
    fn fixed_rank_is_validated() {
        assert!(RankSelection::Fixed(1).validate(3).is_ok());
        assert!(RankSelection::Fixed(3).validate(3).is_ok());
        assert_eq!(
            RankSelection::Fixed(0).validate(3),
            Err(DenoiseError::InvalidRank { rank: 0, window: 3 })
        );
        assert_eq!(
            RankSelection::Fixed(4).validate(3),
            Err(DenoiseError::InvalidRank { rank: 4, window: 3 })
        );
        assert!(RankSelection::Auto.validate(3).is_ok());
    }

    #[test]
    fn fixed_rank_passes_through() {
        let decision = select_rank(&[5.0, 1.0, 0.1], (8, 3), RankSelection::Fixed(2)).unwrap();
        assert_eq!(decision.rank, 2);
        assert!(decision.threshold.is_none());
    }

    #[test]
    fn auto_rank_counts_values_above_threshold() {
        // 20 x 10 matrix, beta = 0.5
        let sv = vec![50.0, 30.0, 1.2, 1.1, 1.0, 0.9, 0.8, 0.7, 0.6, 0.5];
        let decision = select_rank(&sv, (20, 10), RankSelection::Auto).unwrap();

        let omega = optimal_svht_coef_sigma_unknown(0.5).unwrap();
        let expected_threshold = omega * 0.95;
        let threshold = decision.threshold.unwrap();
        assert!((threshold - expected_threshold).abs() < 1e-12);
        assert_eq!(decision.rank, 2);
    }

    #[test]
    fn flat_spectrum_selects_zero_rank() {
        let sv = vec![1.0; 6];
        let decision = select_rank(&sv, (12, 6), RankSelection::Auto).unwrap();
        assert_eq!(decision.rank, 0);
    }

    #[test]
    fn from_option_maps_variants() {
        assert_eq!(RankSelection::from_option(None), RankSelection::Auto);
        assert_eq!(RankSelection::from_option(Some(4)), RankSelection::Fixed(4));
        assert_eq!(RankSelection::default(), RankSelection::Auto);
    }
}
