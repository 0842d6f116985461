use lu_core::{DenseMatrix, LuCoreError, Matrix, Result, Scalar};
use serde::{Deserialize, Serialize};

use crate::lu_factors::LuFactors;

// --- Solve Trait Definition ---
/// Trait representing a factorization that can solve `Ax = b` for any number of right-hand sides.
///
/// Solving never mutates the factors, so repeated solves with the same `b`
/// return bit-identical results.
pub trait LuSolve<T: Scalar> {
    /// Dimension `n` of the factorized `n x n` system.
    fn dim(&self) -> usize;

    /// Solves the system into a caller-owned `x`.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if `b` or `x` do not have length `n`, `SingularMatrix`
    /// if a diagonal entry of U fails the pivot check.
    fn solve_into(&self, b: &[T], x: &mut [T]) -> Result<()>;

    /// Solves the system, allocating the solution vector.
    fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        let mut x = vec![T::zero(); self.dim()];
        self.solve_into(b, &mut x)?;
        Ok(x)
    }
}

// --- Algorithm Trait Definition ---
/// Trait representing a specific LU factorization algorithm.
///
/// The input matrix is taken by value: its buffer is overwritten in place and
/// moves into the returned factors, so a raw matrix can never be mistaken for a
/// factorized one after the call.
pub trait FactorizeAlgorithm<T: Scalar> {
    type Factors: LuSolve<T> + std::fmt::Debug;

    /// Factorizes `a`.
    ///
    /// On error the partially eliminated matrix is dropped.
    fn factorize(&self, a: DenseMatrix<T>) -> Result<Self::Factors>;

    // Helper for input validation, can be called by implementations.
    fn validate_inputs(&self, a: &DenseMatrix<T>) -> Result<()> {
        let (rows, cols) = a.dims();
        if !a.is_square() {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Matrix A must be square (dims: {}x{})",
                rows, cols
            )));
        }
        if rows == 0 {
            return Err(LuCoreError::InvalidDimensions(
                "Matrix A must be at least 1x1".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Algorithm Implementations ---

pub(crate) mod kernels;
pub mod no_pivot; // Right-looking elimination, no row exchanges
pub mod partial_pivot; // Right-looking elimination with row exchanges
pub mod triangular; // Forward and backward substitution on packed factors

// --- Configuration ---

/// How small a pivot may get before the matrix is declared singular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PivotTolerance {
    /// No check at all: a zero pivot yields inf/NaN that propagates into the result.
    Unchecked,
    /// Reject only pivots that are exactly zero (or NaN).
    Exact,
    /// Reject pivots with `|p| <= tol`.
    Absolute(f64),
    /// Reject pivots with `|p| <= k · ε · ‖A‖∞`, where ε is the machine epsilon
    /// of the element type and ‖A‖∞ is taken before elimination. Computed
    /// without overflow and without allocating; a matrix with an infinite entry
    /// gets a threshold of zero.
    EpsilonScaled(f64),
}

impl Default for PivotTolerance {
    fn default() -> Self {
        PivotTolerance::EpsilonScaled(1.0)
    }
}

impl PivotTolerance {
    /// Resolves the tolerance into a concrete threshold for `a`.
    pub fn threshold_for<T: Scalar>(&self, a: &DenseMatrix<T>) -> Option<T> {
        match *self {
            PivotTolerance::Unchecked => None,
            PivotTolerance::Exact => Some(T::zero()),
            PivotTolerance::Absolute(tol) => Some(T::from_f64_lossy(tol)),
            PivotTolerance::EpsilonScaled(k) => Some(epsilon_scaled_threshold(a, k)),
        }
    }
}

/// `k · ε · ‖A‖∞`, evaluated as `(k · ε · ‖A / s‖∞) · s` with `s = max|a_ij|`
/// so that a norm beyond the float range does not turn the threshold into inf.
/// An infinite entry leaves no meaningful scale; the check degrades to `Exact`.
fn epsilon_scaled_threshold<T: Scalar>(a: &DenseMatrix<T>, k: f64) -> T {
    let scale = a.max_abs();
    if scale == T::zero() || !scale.is_finite() {
        log::debug!("Matrix scale is {:?}; falling back to an exact zero-pivot check", scale);
        return T::zero();
    }
    let (rows, cols) = a.dims();
    let mut scaled_norm = T::zero();
    for r in 0..rows {
        let mut sum = T::zero();
        for c in 0..cols {
            sum = sum + (a[(r, c)] / scale).abs();
        }
        scaled_norm = scaled_norm.max(sum);
    }
    T::from_f64_lossy(k) * T::epsilon() * scaled_norm * scale
}

// --- Algorithm Struct Definitions ---
// Define structs that represent specific algorithms and hold their parameters.

/// Unblocked right-looking Gaussian elimination without pivoting.
///
/// Requires every leading principal submatrix to be nonsingular; strict
/// diagonal dominance is sufficient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoPivotLu {
    #[serde(default)]
    pub pivot_tolerance: PivotTolerance,
}

impl NoPivotLu {
    /// Creates a new instance with the default epsilon-scaled pivot check.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a new instance with an explicit pivot tolerance.
    pub fn with_params(pivot_tolerance: PivotTolerance) -> Self {
        Self { pivot_tolerance }
    }
}

/// Right-looking Gaussian elimination with partial (row) pivoting.
///
/// Produces `P·A = L·U`; the permutation travels with the factors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPivotLu {
    #[serde(default)]
    pub pivot_tolerance: PivotTolerance,
}

impl PartialPivotLu {
    /// Creates a new instance with the default epsilon-scaled pivot check.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a new instance with an explicit pivot tolerance.
    pub fn with_params(pivot_tolerance: PivotTolerance) -> Self {
        Self { pivot_tolerance }
    }
}

/// Factorizes `a` with [`NoPivotLu`] defaults and solves for `b`.
pub fn solve_dense<T: Scalar>(a: DenseMatrix<T>, b: &[T]) -> Result<Vec<T>> {
    let factors: LuFactors<T> = NoPivotLu::new().factorize(a)?;
    factors.solve(b)
}
