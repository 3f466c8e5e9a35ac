//! SVD-based denoising of a single series.
//!
//! The series is embedded into a Hankel matrix, the SVD of that matrix is
//! truncated at a rank chosen by the optimal hard threshold (or supplied by
//! the caller), and the truncated matrix is averaged back along its
//! anti-diagonals.
//!
//! # Example
//!
//! ```
//! use epidenoise::denoise::{denoise, SvdDenoiser};
//!
//! let series: Vec<f64> = (0..104).map(|i| 20.0 + (i as f64 / 8.0).sin()).collect();
//!
//! // Plain entry point: denoised series and rank used
//! let (denoised, rank) = denoise(&series, 52, None).unwrap();
//! assert_eq!(denoised.len(), series.len());
//!
//! // Structured result with the spectrum and threshold
//! let result = SvdDenoiser::new(52).denoise(&series).unwrap();
//! assert_eq!(result.rank, rank);
//! ```

mod denoiser;
mod rank;
mod svd;

pub use denoiser::{denoise, DenoiseResult, SvdDenoiser};
pub use rank::{select_rank, RankDecision, RankSelection};
pub use svd::SpectralDecomposition;
