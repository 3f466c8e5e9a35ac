//! Error types for the epidenoise library.

use thiserror::Error;

/// Result type alias for denoising and smoothing operations.
pub type Result<T> = std::result::Result<T, DenoiseError>;

/// Errors that can occur while denoising or smoothing a series.
///
/// Every variant is a precondition violation detected before any numerical
/// work starts, except `ComputationError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DenoiseError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Embedding window is zero or longer than the series.
    #[error("invalid window: {window} (series length: {len})")]
    InvalidWindow { window: usize, len: usize },

    /// Caller-supplied truncation rank outside `1..=window`.
    #[error("invalid rank: {rank} (must be in 1..={window})")]
    InvalidRank { rank: usize, window: usize },

    /// Matrix aspect ratio outside `(0, 1]`.
    #[error("invalid aspect ratio: {0} (must be in (0, 1])")]
    InvalidAspectRatio(f64),

    /// Smoothing configuration rejected before filtering.
    #[error("invalid smoothing config: {0}")]
    InvalidSmoothingConfig(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between series that must be aligned.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Epidemiological week code that is not `YYYYWW` with week in 1..=53.
    #[error("invalid epidemiological week: {0}")]
    InvalidEpiWeek(i64),

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),
}
