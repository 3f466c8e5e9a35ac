//! Anti-diagonal averaging (Hankelization) back to a 1-D series.

use nalgebra::DMatrix;

/// Number of matrix entries on each anti-diagonal of an `(n - window + 1) x window`
/// trajectory matrix.
///
/// Entry `k` equals `min(k + 1, window, n - k, n - window + 1)`. Returns an
/// empty vector when `window == 0` or `window > n`.
///
/// # Example
/// ```
/// use epidenoise::embedding::anti_diagonal_counts;
///
/// assert_eq!(anti_diagonal_counts(5, 2), vec![1, 2, 2, 2, 1]);
/// ```
pub fn anti_diagonal_counts(n: usize, window: usize) -> Vec<usize> {
    if window == 0 || window > n {
        return Vec::new();
    }
    let rows = n - window + 1;
    (0..n)
        .map(|k| (k + 1).min(window).min(n - k).min(rows))
        .collect()
}

/// Collapse a trajectory-shaped matrix into a series of length `rows + cols - 1`.
///
/// Each entry `(i, j)` is accumulated into output index `i + j`; the sums are
/// then divided by the number of entries that contributed. An empty matrix
/// yields an empty series.
///
/// # Example
/// ```
/// use epidenoise::embedding::{diagonal_average, HankelMatrix};
///
/// let series = vec![1.0, 5.0, 2.0, 8.0];
/// let h = HankelMatrix::new(&series, 2).unwrap();
/// assert_eq!(diagonal_average(h.as_matrix()), series);
/// ```
pub fn diagonal_average(matrix: &DMatrix<f64>) -> Vec<f64> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let n = rows + cols - 1;
    let mut sums = vec![0.0; n];
    let mut counts = vec![0usize; n];

    for j in 0..cols {
        for i in 0..rows {
            sums[i + j] += matrix[(i, j)];
            counts[i + j] += 1;
        }
    }

    sums.iter()
        .zip(counts.iter())
        .map(|(&s, &c)| s / c as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HankelMatrix;
    use approx::assert_relative_eq;

    #[test]
    fn counts_for_ten_by_three() {
        let counts = anti_diagonal_counts(10, 3);
        assert_eq!(counts, vec![1, 2, 3, 3, 3, 3, 3, 3, 2, 1]);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[9], 1);
        for k in 2..=7 {
            assert_eq!(counts[k], 3);
        }
    }

    #[test]
    fn counts_limited_by_row_count() {
        // Wide matrix: 2 rows x 4 columns, no position sees more than 2 entries.
        assert_eq!(anti_diagonal_counts(5, 4), vec![1, 2, 2, 2, 1]);
        assert_eq!(anti_diagonal_counts(4, 4), vec![1, 1, 1, 1]);
        assert_eq!(anti_diagonal_counts(4, 1), vec![1, 1, 1, 1]);
    }

    #[test]
    fn counts_are_positive_and_sum_to_entries() {
        for n in 1..20 {
            for w in 1..=n {
                let counts = anti_diagonal_counts(n, w);
                assert_eq!(counts.len(), n);
                assert!(counts.iter().all(|&c| c >= 1));
                assert_eq!(counts.iter().sum::<usize>(), (n - w + 1) * w);
            }
        }
    }

    #[test]
    fn invalid_shapes_have_no_counts() {
        assert!(anti_diagonal_counts(3, 0).is_empty());
        assert!(anti_diagonal_counts(3, 4).is_empty());
    }

    #[test]
    fn averaging_inverts_embedding() {
        let series: Vec<f64> = (0..17).map(|i| (i as f64 * 0.7).sin() * 3.0 + i as f64).collect();
        for w in [1, 2, 5, 9, 17] {
            let h = HankelMatrix::new(&series, w).unwrap();
            let back = diagonal_average(h.as_matrix());
            assert_eq!(back.len(), series.len());
            for (a, b) in back.iter().zip(series.iter()) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn averaging_mixes_disagreeing_entries() {
        // Anti-diagonal 1 holds 2.0 and 4.0.
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 9.0]);
        let out = diagonal_average(&m);
        assert_eq!(out, vec![1.0, 3.0, 9.0]);
    }

    #[test]
    fn empty_matrix_gives_empty_series() {
        let m = DMatrix::<f64>::zeros(0, 3);
        assert!(diagonal_average(&m).is_empty());
    }
}
