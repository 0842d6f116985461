use log::{debug, trace, warn};
use lu_core::{DenseMatrix, LuCoreError, Matrix, Result, Scalar};

use super::kernels::{check_pivot, check_square_storage, eliminate_below, track_min_pivot};
use super::{FactorizeAlgorithm, PartialPivotLu};
use crate::lu_factors::{LuFactors, PivotedLuFactors};
use crate::permutation::Permutation;

/// Swaps rows `i` and `j` across every column (stride `n`).
fn swap_rows<T>(a: &mut [T], n: usize, i: usize, j: usize) {
    for c in 0..n {
        a.swap(i + c * n, j + c * n);
    }
}

/// Factorizes the column-major `n x n` matrix in `a` in place with partial pivoting.
///
/// At step `d` the row holding the largest `|A[r, d]|` for `r >= d` is swapped
/// into position `d`; whole rows are exchanged, previously stored multipliers
/// included, so the packed result satisfies `P·A = L·U`. On return
/// `row_perm[i]` is the original row now at position `i`. Returns the smallest
/// pivot magnitude seen, or NaN if any pivot was NaN.
///
/// # Errors
///
/// `InvalidDimensions` if `n == 0`, `a.len() != n * n` or `row_perm.len() != n`;
/// `SingularMatrix` if even the largest candidate fails the pivot check.
pub fn factorize_partial_pivot_in_place<T: Scalar>(
    a: &mut [T],
    n: usize,
    row_perm: &mut [usize],
    threshold: Option<T>,
) -> Result<T> {
    check_square_storage(a.len(), n)?;
    if row_perm.len() != n {
        return Err(LuCoreError::InvalidDimensions(format!(
            "Permutation length ({}) must match matrix dimension ({})",
            row_perm.len(),
            n
        )));
    }
    for (i, p) in row_perm.iter_mut().enumerate() {
        *p = i;
    }

    let mut min_pivot = T::infinity();
    for d in 0..n {
        let candidates = &a[d * n + d..(d + 1) * n];
        let mut offset = 0;
        let mut best = candidates[0].abs();
        for (k, v) in candidates.iter().enumerate().skip(1) {
            if v.abs() > best {
                best = v.abs();
                offset = k;
            }
        }

        if offset != 0 {
            trace!("step {}: swapping rows {} and {}", d, d, d + offset);
            swap_rows(a, n, d, d + offset);
            row_perm.swap(d, d + offset);
        }

        let pivot = a[d + d * n];
        check_pivot(d, pivot, threshold)?;
        min_pivot = track_min_pivot(min_pivot, pivot);

        if d + 1 < n {
            eliminate_below(a, n, d, pivot);
        }
    }
    Ok(min_pivot)
}

impl<T: Scalar> FactorizeAlgorithm<T> for PartialPivotLu {
    type Factors = PivotedLuFactors<T>;

    fn factorize(&self, a: DenseMatrix<T>) -> Result<PivotedLuFactors<T>> {
        self.validate_inputs(&a)?;

        let n = a.cols();
        let threshold = self.pivot_tolerance.threshold_for(&a);
        debug!(
            "Partial-pivot LU: n = {}, tolerance = {:?}, threshold = {:?}",
            n, self.pivot_tolerance, threshold
        );

        let mut packed = a.into_data();
        let mut row_perm = vec![0; n];
        let min_pivot = factorize_partial_pivot_in_place(&mut packed, n, &mut row_perm, threshold)?;

        let factors = PivotedLuFactors::new(
            LuFactors::new(n, packed, threshold, min_pivot),
            Permutation::from_vec(row_perm)?,
        );
        if threshold.is_none() && factors.factors().has_degenerate_pivot() {
            warn!(
                "Unchecked pivoted LU produced a zero or non-finite pivot (n = {}); solutions will contain inf/NaN",
                n
            );
        }
        Ok(factors)
    }
}
