use log::{debug, trace, warn};
use lu_core::{DenseMatrix, Matrix, Result, Scalar};

use super::kernels::{check_pivot, check_square_storage, eliminate_below, track_min_pivot};
use super::{FactorizeAlgorithm, NoPivotLu};
use crate::lu_factors::LuFactors;

/// Factorizes the column-major `n x n` matrix in `a` in place, without pivoting.
///
/// On success `a` holds the packed form: the multipliers of L strictly below
/// the diagonal (L's unit diagonal is implicit) and U on and above it. Every
/// one of the `n` pivots, including the last one that elimination never
/// divides by, is checked against `threshold`. Returns the smallest pivot
/// magnitude seen, or NaN if any pivot was NaN.
///
/// # Errors
///
/// `InvalidDimensions` if `n == 0` or `a.len() != n * n`; `SingularMatrix` on
/// the first pivot that fails the check, leaving `a` partially eliminated.
pub fn factorize_in_place<T: Scalar>(a: &mut [T], n: usize, threshold: Option<T>) -> Result<T> {
    check_square_storage(a.len(), n)?;

    let mut min_pivot = T::infinity();
    for d in 0..n {
        let pivot = a[d + d * n];
        check_pivot(d, pivot, threshold)?;
        trace!("step {}: pivot {:?}", d, pivot);
        min_pivot = track_min_pivot(min_pivot, pivot);

        if d + 1 < n {
            eliminate_below(a, n, d, pivot);
        }
    }
    Ok(min_pivot)
}

impl<T: Scalar> FactorizeAlgorithm<T> for NoPivotLu {
    type Factors = LuFactors<T>;

    fn factorize(&self, a: DenseMatrix<T>) -> Result<LuFactors<T>> {
        self.validate_inputs(&a)?;

        let n = a.cols();
        let threshold = self.pivot_tolerance.threshold_for(&a);
        debug!(
            "No-pivot LU: n = {}, tolerance = {:?}, threshold = {:?}",
            n, self.pivot_tolerance, threshold
        );

        let mut packed = a.into_data();
        let min_pivot = factorize_in_place(&mut packed, n, threshold)?;

        let factors = LuFactors::new(n, packed, threshold, min_pivot);
        if threshold.is_none() && factors.has_degenerate_pivot() {
            warn!(
                "Unchecked LU produced a zero or non-finite pivot (n = {}); solutions will contain inf/NaN",
                n
            );
        }
        Ok(factors)
    }
}
