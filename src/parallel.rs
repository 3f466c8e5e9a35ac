//! Conditional parallel iteration.
//!
//! With the `parallel` feature the batch runners iterate with rayon; without
//! it they fall back to plain sequential iterators. Callers write the same
//! adapter chain either way.

/// Iterate over a slice by reference, in parallel when the `parallel`
/// feature is enabled.
macro_rules! slice_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            $expr.par_iter()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $expr.iter()
        }
    }};
}

pub(crate) use slice_maybe_parallel;
