//! # epidenoise
//!
//! Denoising and smoothing of weekly epidemiological and climate series.
//!
//! Each series is embedded into a Hankel trajectory matrix and truncated at
//! the rank selected by the Gavish–Donoho optimal hard threshold (with the
//! Marchenko–Pastur median when the noise level is unknown). The denoised
//! series is then smoothed with a Savitzky–Golay filter and a cubic-spline
//! resampling round trip, and finalised per field (case counts become
//! non-negative integers).
//!
//! ```
//! use epidenoise::{denoise, smooth};
//!
//! let series: Vec<f64> = (0..104)
//!     .map(|i| 30.0 + 20.0 * (i as f64 / 8.3).sin() + ((i * 13) % 5) as f64)
//!     .collect();
//!
//! let (denoised, rank) = denoise(&series, 52, None).unwrap();
//! let smoothed = smooth(&denoised, 11, 3, 0.5).unwrap();
//!
//! assert!(rank >= 1);
//! assert_eq!(smoothed.len(), series.len());
//! ```

#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]

pub mod denoise;
pub mod embedding;
pub mod error;
mod parallel;
pub mod region;
pub mod smoothing;
pub mod threshold;
pub mod utils;

pub use denoise::denoise;
pub use error::{DenoiseError, Result};
pub use smoothing::{smooth, DEFAULT_RESAMPLE_FACTOR};

pub mod prelude {
    pub use crate::denoise::{denoise, DenoiseResult, RankSelection, SvdDenoiser};
    pub use crate::error::{DenoiseError, Result};
    pub use crate::region::{
        EpiWeek, Field, PipelineConfig, ProcessedRegion, RegionPipeline, RegionSeries,
    };
    pub use crate::smoothing::{
        post_process, smooth, FieldKind, Smoother, SmoothingConfig, DEFAULT_RESAMPLE_FACTOR,
    };
    pub use crate::threshold::{optimal_svht_coef, NoiseLevel};
}
