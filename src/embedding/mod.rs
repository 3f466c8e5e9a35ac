//! Hankel embedding and its inverse.
//!
//! A series of length N is embedded into an `(N - w + 1) x w` trajectory
//! matrix; after the matrix has been modified (e.g. truncated SVD), anti-diagonal
//! averaging maps it back to a series of length N.
//!
//! # Example
//!
//! ```
//! use epidenoise::embedding::{diagonal_average, HankelMatrix};
//!
//! let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let h = HankelMatrix::new(&series, 3).unwrap();
//! assert_eq!(h.shape(), (3, 3));
//!
//! let back = diagonal_average(h.as_matrix());
//! assert_eq!(back, series);
//! ```

mod diagonal;
mod hankel;

pub use diagonal::{anti_diagonal_counts, diagonal_average};
pub use hankel::HankelMatrix;
