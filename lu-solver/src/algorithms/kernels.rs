//! Building blocks shared by the elimination and substitution kernels.

use lu_core::{LuCoreError, Result, Scalar};

/// Validates that `len` elements can hold an `n x n` matrix with `n >= 1`.
pub(crate) fn check_square_storage(len: usize, n: usize) -> Result<()> {
    if n == 0 {
        return Err(LuCoreError::InvalidDimensions(
            "Matrix dimension n must be at least 1".to_string(),
        ));
    }
    if n.checked_mul(n) != Some(len) {
        return Err(LuCoreError::InvalidDimensions(format!(
            "Storage length ({}) does not match an {}x{} matrix",
            len, n, n
        )));
    }
    Ok(())
}

pub(crate) fn check_vector_len(name: &str, len: usize, n: usize) -> Result<()> {
    if len != n {
        return Err(LuCoreError::InvalidDimensions(format!(
            "Vector {} length ({}) must match matrix dimension ({})",
            name, len, n
        )));
    }
    Ok(())
}

/// Folds one pivot into the running minimum magnitude. A NaN pivot poisons the
/// minimum for good, so degenerate unchecked factorizations stay visible.
pub(crate) fn track_min_pivot<T: Scalar>(current: T, pivot: T) -> T {
    if current.is_nan() || pivot.is_nan() {
        T::nan()
    } else {
        current.min(pivot.abs())
    }
}

/// A pivot passes only if its magnitude is strictly above the threshold, which
/// also rejects NaN. `None` disables the check.
pub(crate) fn check_pivot<T: Scalar>(step: usize, pivot: T, threshold: Option<T>) -> Result<()> {
    match threshold {
        Some(t) if pivot.abs() > t => Ok(()),
        Some(t) => Err(LuCoreError::SingularMatrix {
            step,
            pivot: pivot.to_f64_lossy(),
            threshold: t.to_f64_lossy(),
        }),
        None => Ok(()),
    }
}

/// One right-looking elimination step on column-major storage.
///
/// Scales column `d` below the diagonal by `1 / pivot` (these become L's
/// multipliers), then subtracts `m_r * A[d, c]` from every `A[r, c]` with
/// `r, c > d`. The trailing update walks each column top to bottom, so both
/// phases are unit stride.
pub(crate) fn eliminate_below<T: Scalar>(a: &mut [T], n: usize, d: usize, pivot: T) {
    let (left, trailing) = a.split_at_mut((d + 1) * n);
    let multipliers = &mut left[d * n + d + 1..];
    for m in multipliers.iter_mut() {
        *m = *m / pivot;
    }
    let multipliers = &*multipliers;

    for column in trailing.chunks_exact_mut(n) {
        let (head, below) = column.split_at_mut(d + 1);
        let u = head[d];
        for (x, &m) in below.iter_mut().zip(multipliers) {
            *x = *x - m * u;
        }
    }
}
