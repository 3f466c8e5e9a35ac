//! Sliding-window (Hankel) embedding of a series.

use crate::error::{DenoiseError, Result};
use crate::threshold::aspect_ratio;
use nalgebra::DMatrix;

/// Trajectory matrix of a series: row `i` is `series[i..i + window]`.
///
/// Every anti-diagonal `i + j = k` holds copies of sample `k`, so samples near
/// either end of the series appear fewer times than interior samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HankelMatrix {
    matrix: DMatrix<f64>,
    window: usize,
}

impl HankelMatrix {
    /// Embed `series` with the given window length.
    ///
    /// The result has shape `(N - window + 1, window)`.
    ///
    /// # Errors
    /// `InvalidWindow` when `window == 0` or `window > series.len()`.
    ///
    /// # Example
    /// ```
    /// use epidenoise::embedding::HankelMatrix;
    ///
    /// let h = HankelMatrix::new(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
    /// assert_eq!(h.shape(), (3, 2));
    /// assert_eq!(h.row(1), vec![2.0, 3.0]);
    /// ```
    pub fn new(series: &[f64], window: usize) -> Result<Self> {
        let n = series.len();
        if window == 0 || window > n {
            return Err(DenoiseError::InvalidWindow { window, len: n });
        }

        let rows = n - window + 1;
        let matrix = DMatrix::from_fn(rows, window, |i, j| series[i + j]);

        Ok(Self { matrix, window })
    }

    /// Number of rows, `N - window + 1`.
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns, the window length.
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Matrix shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Window length used for the embedding.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Length of the embedded series.
    pub fn series_len(&self) -> usize {
        self.nrows() + self.ncols() - 1
    }

    /// `min(m, n) / max(m, n)` of the matrix shape.
    pub fn aspect_ratio(&self) -> f64 {
        aspect_ratio(self.nrows(), self.ncols())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.matrix.row(i).iter().copied().collect()
    }

    /// Borrow the underlying dense matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Take ownership of the underlying dense matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.matrix
    }
}
