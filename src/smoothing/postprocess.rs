//! Final clean-up applied to smoothed series.

/// How a smoothed series is finalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Non-negative integer counts: rounded half to even, then clipped at zero.
    Count,
    /// Continuous measurements: clipped at zero only.
    Continuous,
}

/// Replace every negative value with zero.
pub fn clip_non_negative(series: &[f64]) -> Vec<f64> {
    series.iter().map(|&x| if x < 0.0 { 0.0 } else { x }).collect()
}

/// Round to the nearest integer, ties to even.
pub fn round_counts(series: &[f64]) -> Vec<f64> {
    series.iter().map(|x| x.round_ties_even()).collect()
}

/// Apply the clean-up for `kind`.
///
/// # Example
/// ```
/// use epidenoise::smoothing::{post_process, FieldKind};
///
/// let out = post_process(&[2.5, 3.5, -0.4, -1.7], FieldKind::Count);
/// assert_eq!(out, vec![2.0, 4.0, 0.0, 0.0]);
/// ```
pub fn post_process(series: &[f64], kind: FieldKind) -> Vec<f64> {
    match kind {
        FieldKind::Count => clip_non_negative(&round_counts(series)),
        FieldKind::Continuous => clip_non_negative(series),
    }
}
