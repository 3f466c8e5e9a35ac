//! Smoothing of denoised series.
//!
//! A Savitzky–Golay filter removes the remaining high-frequency wiggle, then
//! a not-a-knot cubic spline is evaluated on a finer index grid and sampled
//! back at the original positions. Count and continuous fields are finalised
//! differently by [`post_process`].
//!
//! # Example
//!
//! ```
//! use epidenoise::smoothing::{post_process, smooth, FieldKind};
//!
//! let cases: Vec<f64> = (0..40).map(|i| (i % 7) as f64 * 3.0).collect();
//! let smoothed = smooth(&cases, 11, 3, 0.5).unwrap();
//! let finished = post_process(&smoothed, FieldKind::Count);
//!
//! assert_eq!(finished.len(), cases.len());
//! assert!(finished.iter().all(|v| *v >= 0.0 && v.fract() == 0.0));
//! ```

mod pipeline;
mod postprocess;
mod savgol;
mod spline;

pub use pipeline::{smooth, Smoother, SmoothingConfig};
pub use postprocess::{clip_non_negative, post_process, round_counts, FieldKind};
pub use savgol::SavitzkyGolay;
pub use spline::{
    resample_round_trip, resample_stride, upsample, CubicSpline, DEFAULT_RESAMPLE_FACTOR,
};
