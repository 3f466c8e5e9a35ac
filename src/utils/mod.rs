//! Numerical utility functions shared by the pipeline stages.

pub mod quadrature;
pub mod stats;

pub use quadrature::{integrate, QuadratureConfig, QuadratureResult};
pub use stats::{linspace, max_abs_diff, median};
