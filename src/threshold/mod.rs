//! Singular value thresholding.
//!
//! This module provides the Gavish–Donoho optimal hard threshold and the
//! Marchenko–Pastur distribution it relies on when the noise level has to be
//! estimated from the spectrum itself.
//!
//! # Example
//!
//! ```
//! use epidenoise::threshold::{optimal_svht_coef, NoiseLevel};
//!
//! let omega = optimal_svht_coef(1.0, NoiseLevel::Unknown).unwrap();
//! assert!((omega - 2.858).abs() < 1e-3);
//! ```

mod marchenko_pastur;
mod svht;

pub use marchenko_pastur::{
    median_marchenko_pastur, MarchenkoPastur, MEDIAN_GRID_POINTS, MEDIAN_TOLERANCE,
};
pub use svht::{
    aspect_ratio, optimal_svht_coef, optimal_svht_coef_sigma_known,
    optimal_svht_coef_sigma_unknown, svht_threshold, NoiseLevel,
};
