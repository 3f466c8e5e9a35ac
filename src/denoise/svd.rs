//! Sorted singular value decomposition and truncated reconstruction.

use crate::error::{DenoiseError, Result};
use nalgebra::DMatrix;

/// Thin SVD `A = U * diag(S) * V^T` with singular values sorted descending.
#[derive(Debug, Clone)]
pub struct SpectralDecomposition {
    u: DMatrix<f64>,
    singular_values: Vec<f64>,
    v_t: DMatrix<f64>,
}

impl SpectralDecomposition {
    /// Decompose `matrix`.
    ///
    /// # Errors
    /// `ComputationError` if the SVD does not produce both singular vector sets.
    pub fn new(matrix: &DMatrix<f64>) -> Result<Self> {
        let svd = matrix
            .clone()
            .try_svd(true, true, f64::EPSILON, 0)
            .ok_or_else(|| DenoiseError::ComputationError("SVD did not converge".into()))?;

        let u = svd
            .u
            .ok_or_else(|| DenoiseError::ComputationError("SVD returned no U".into()))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| DenoiseError::ComputationError("SVD returned no V^T".into()))?;

        let values: Vec<f64> = svd.singular_values.iter().copied().collect();
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| {
            values[b]
                .partial_cmp(&values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self {
            u: u.select_columns(order.iter()),
            singular_values: order.iter().map(|&i| values[i]).collect(),
            v_t: v_t.select_rows(order.iter()),
        })
    }

    /// Singular values, largest first.
    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Left singular vectors as columns, in singular value order.
    pub fn u(&self) -> &DMatrix<f64> {
        &self.u
    }

    /// Right singular vectors as rows, in singular value order.
    pub fn v_t(&self) -> &DMatrix<f64> {
        &self.v_t
    }

    /// Number of singular triads, `min(m, n)`.
    pub fn len(&self) -> usize {
        self.singular_values.len()
    }

    /// Whether the decomposition holds no triads.
    pub fn is_empty(&self) -> bool {
        self.singular_values.is_empty()
    }

    /// Rebuild the matrix from the leading `rank` triads.
    ///
    /// Triads beyond `rank` are treated as zero. `rank == 0` gives the zero
    /// matrix; ranks above `len()` keep every triad.
    pub fn reconstruct(&self, rank: usize) -> DMatrix<f64> {
        let (m, n) = (self.u.nrows(), self.v_t.ncols());
        let k = rank.min(self.len());
        if k == 0 {
            return DMatrix::zeros(m, n);
        }

        let mut scaled_u = self.u.columns(0, k).into_owned();
        for (j, &s) in self.singular_values.iter().take(k).enumerate() {
            scaled_u.column_mut(j).scale_mut(s);
        }
        scaled_u * self.v_t.rows(0, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_matrix_close(a: &DMatrix<f64>, b: &DMatrix<f64>, eps: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x, y, epsilon = eps);
        }
    }

    #[test]
    fn singular_values_sorted_descending() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let svd = SpectralDecomposition::new(&m).unwrap();
        let s = svd.singular_values();
        assert_eq!(s.len(), 3);
        assert_relative_eq!(s[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(s[1], 3.0, epsilon = 1e-12);
        assert_relative_eq!(s[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn full_reconstruction_recovers_matrix() {
        let tall = DMatrix::from_fn(6, 3, |i, j| ((i * 3 + j) as f64).sin() + i as f64);
        let svd = SpectralDecomposition::new(&tall).unwrap();
        assert_matrix_close(&svd.reconstruct(3), &tall, 1e-10);

        let wide = tall.transpose();
        let svd = SpectralDecomposition::new(&wide).unwrap();
        assert_eq!(svd.len(), 3);
        assert_matrix_close(&svd.reconstruct(3), &wide, 1e-10);
        assert_matrix_close(&svd.reconstruct(10), &wide, 1e-10);
    }

    #[test]
    fn rank_one_truncation_keeps_dominant_direction() {
        // Rank-one outer product plus a small perturbation.
        let a = DMatrix::from_fn(4, 2, |i, j| {
            let main = (i + 1) as f64 * if j == 0 { 1.0 } else { 2.0 };
            let minor = if i == 0 && j == 0 { 1e-3 } else { 0.0 };
            main + minor
        });
        let svd = SpectralDecomposition::new(&a).unwrap();
        let r1 = svd.reconstruct(1);
        assert_matrix_close(&r1, &a, 2e-3);
        assert!(svd.singular_values()[1] < 1e-2);
    }

    #[test]
    fn zero_rank_gives_zero_matrix() {
        let a = DMatrix::from_fn(5, 2, |i, j| (i + j) as f64);
        let svd = SpectralDecomposition::new(&a).unwrap();
        let z = svd.reconstruct(0);
        assert_eq!(z.shape(), (5, 2));
        assert!(z.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn singular_values_are_non_negative() {
        let a = DMatrix::from_fn(7, 4, |i, j| ((i as f64) - (j as f64) * 1.5).cos());
        let svd = SpectralDecomposition::new(&a).unwrap();
        assert!(!svd.is_empty());
        assert!(svd.singular_values().iter().all(|&s| s >= 0.0));
        assert_eq!(svd.u().shape(), (7, 4));
        assert_eq!(svd.v_t().shape(), (4, 4));
    }
}
