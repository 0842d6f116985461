use crate::dense_matrix::DenseMatrix;
use crate::error::Result;
use crate::traits::Scalar;

/// Largest absolute entry of `v`, zero for an empty slice.
pub fn norm_inf<T: Scalar>(v: &[T]) -> T {
    v.iter().map(|x| x.abs()).fold(T::zero(), T::max)
}

/// Computes `‖A·x − b‖∞`, the usual acceptance check after a solve.
///
/// # Errors
/// Returns `InvalidDimensions` if `x` or `b` do not match the shape of `a`.
pub fn residual_norm_inf<T: Scalar>(a: &DenseMatrix<T>, x: &[T], b: &[T]) -> Result<T> {
    let ax = a.mul_vec(x)?;
    if ax.len() != b.len() {
        return Err(crate::LuCoreError::InvalidDimensions(format!(
            "Matrix rows ({}) must match RHS vector b length ({})",
            ax.len(),
            b.len()
        )));
    }
    Ok(ax
        .iter()
        .zip(b)
        .map(|(&l, &r)| (l - r).abs())
        .fold(T::zero(), T::max))
}
