use log::debug;
use lu_core::{Result, Scalar};

use super::kernels::{check_pivot, check_square_storage, check_vector_len};

/// Solves `L·U·x = b` from the packed column-major factors in `lu`.
///
/// Forward substitution solves `L·y = b` using the implicit unit diagonal of
/// L (no division), then backward substitution solves `U·x = y`, dividing by
/// each `U[i, i]` after checking it against `threshold`. `y` lives only for
/// the duration of the call; `lu` and `b` are not modified.
///
/// # Errors
///
/// `InvalidDimensions` on any size mismatch, `SingularMatrix` if a diagonal
/// entry of U fails the pivot check. `x` is unspecified after an error.
pub fn solve_packed<T: Scalar>(
    lu: &[T],
    n: usize,
    b: &[T],
    x: &mut [T],
    threshold: Option<T>,
) -> Result<()> {
    check_square_storage(lu.len(), n)?;
    check_vector_len("b", b.len(), n)?;
    check_vector_len("x", x.len(), n)?;
    debug!("Triangular solve: n = {}, threshold = {:?}", n, threshold);

    // Phase 1: L·y = b
    let mut y = vec![T::zero(); n];
    for i in 0..n {
        let mut acc = b[i];
        for j in 0..i {
            acc = acc - lu[i + j * n] * y[j];
        }
        y[i] = acc;
    }

    // Phase 2: U·x = y
    for i in (0..n).rev() {
        let mut acc = y[i];
        for j in i + 1..n {
            acc = acc - lu[i + j * n] * x[j];
        }
        let pivot = lu[i + i * n];
        check_pivot(i, pivot, threshold)?;
        x[i] = acc / pivot;
    }
    Ok(())
}
