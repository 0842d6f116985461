//! Builders for systems that satisfy the no-pivoting precondition.
//!
//! Every matrix produced here is strictly diagonally dominant, so Gaussian
//! elimination without row exchanges never meets a zero pivot.

use crate::dense_matrix::DenseMatrix;
use crate::traits::Scalar;

/// `A[i,i] = n + 1`, `A[i,j] = 1 / (1 + |i - j|)`.
///
/// Off-diagonal row sums stay below `2·ln(n) + 2`, well under `n + 1`.
pub fn diagonally_dominant<T: Scalar>(n: usize) -> DenseMatrix<T> {
    log::trace!("Generating {}x{} diagonally dominant matrix", n, n);
    DenseMatrix::from_fn(n, n, |i, j| {
        if i == j {
            T::from_f64_lossy(n as f64 + 1.0)
        } else {
            T::from_f64_lossy(1.0 / (1.0 + i.abs_diff(j) as f64))
        }
    })
}

/// `b[i] = 1 + 0.1·i`.
pub fn ramp_vector<T: Scalar>(n: usize) -> Vec<T> {
    (0..n).map(|i| T::from_f64_lossy(1.0 + 0.1 * i as f64)).collect()
}

/// Random matrix with off-diagonal entries in `[-1, 1)` and each diagonal entry
/// set to its row's off-diagonal magnitude sum plus a margin in `[1, 2)`, with a random sign.
pub fn random_diagonally_dominant<T: Scalar>(n: usize, rng: &mut fastrand::Rng) -> DenseMatrix<T> {
    log::trace!("Generating random {}x{} diagonally dominant matrix", n, n);
    let mut off_diagonal = vec![vec![0.0f64; n]; n];
    let mut row_sums = vec![0.0f64; n];
    for (i, row) in off_diagonal.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            if i != j {
                *value = rng.f64() * 2.0 - 1.0;
                row_sums[i] += value.abs();
            }
        }
    }
    let diagonal: Vec<f64> = row_sums
        .iter()
        .map(|sum| {
            let magnitude = sum + 1.0 + rng.f64();
            if rng.bool() {
                magnitude
            } else {
                -magnitude
            }
        })
        .collect();
    DenseMatrix::from_fn(n, n, |i, j| {
        if i == j {
            T::from_f64_lossy(diagonal[i])
        } else {
            T::from_f64_lossy(off_diagonal[i][j])
        }
    })
}

/// Random vector with entries in `[-1, 1)`.
pub fn random_vector<T: Scalar>(n: usize, rng: &mut fastrand::Rng) -> Vec<T> {
    (0..n)
        .map(|_| T::from_f64_lossy(rng.f64() * 2.0 - 1.0))
        .collect()
}
