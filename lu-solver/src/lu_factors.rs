use lu_core::{DenseMatrix, Matrix, Result, Scalar};

use crate::algorithms::{kernels::check_vector_len, triangular::solve_packed, LuSolve};
use crate::permutation::Permutation;

/// A matrix that has been factorized in place into packed L/U form.
///
/// The column-major `n x n` storage holds L's multipliers strictly below the
/// diagonal and U on and above it. L's diagonal is all ones and is never
/// stored; readers of the packed data must supply it themselves. The buffer is
/// the same allocation the raw [`DenseMatrix`] owned before factorization.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors<T: Scalar> {
    n: usize,
    packed: Vec<T>,
    threshold: Option<T>,
    min_pivot: T,
}

impl<T: Scalar> LuFactors<T> {
    pub(crate) fn new(n: usize, packed: Vec<T>, threshold: Option<T>, min_pivot: T) -> Self {
        Self {
            n,
            packed,
            threshold,
            min_pivot,
        }
    }

    /// The packed column-major storage.
    pub fn packed(&self) -> &[T] {
        &self.packed
    }

    /// Pivot threshold the factorization was checked against; reused by every solve.
    pub fn threshold(&self) -> Option<T> {
        self.threshold
    }

    /// Smallest pivot magnitude met during elimination; NaN if any pivot was NaN.
    pub fn min_pivot(&self) -> T {
        self.min_pivot
    }

    /// True if some diagonal entry of U is zero, inf or NaN. Only possible when
    /// the factorization ran with `PivotTolerance::Unchecked`.
    pub fn has_degenerate_pivot(&self) -> bool {
        (0..self.n)
            .map(|i| self.packed[i + i * self.n])
            .any(|p| p == T::zero() || !p.is_finite())
    }

    /// Unit lower-triangular factor L, with the implicit diagonal written out.
    pub fn lower(&self) -> DenseMatrix<T> {
        let n = self.n;
        DenseMatrix::from_fn(n, n, |r, c| match r.cmp(&c) {
            std::cmp::Ordering::Greater => self.packed[r + c * n],
            std::cmp::Ordering::Equal => T::one(),
            std::cmp::Ordering::Less => T::zero(),
        })
    }

    /// Upper-triangular factor U.
    pub fn upper(&self) -> DenseMatrix<T> {
        let n = self.n;
        DenseMatrix::from_fn(n, n, |r, c| {
            if r <= c {
                self.packed[r + c * n]
            } else {
                T::zero()
            }
        })
    }

    /// Multiplies the factors back together, giving `L·U`.
    pub fn reconstruct(&self) -> Result<DenseMatrix<T>> {
        self.lower().matmul(&self.upper())
    }

    /// Gives the buffer back for reuse. The contents are still in packed form.
    pub fn into_storage(self) -> Vec<T> {
        self.packed
    }
}

impl<T: Scalar> Matrix for LuFactors<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.n, self.n)
    }
}

impl<T: Scalar> LuSolve<T> for LuFactors<T> {
    fn dim(&self) -> usize {
        self.n
    }

    fn solve_into(&self, b: &[T], x: &mut [T]) -> Result<()> {
        solve_packed(&self.packed, self.n, b, x, self.threshold)
    }
}

/// Packed L/U factors of `P·A` together with the row permutation `P`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedLuFactors<T: Scalar> {
    factors: LuFactors<T>,
    permutation: Permutation,
}

impl<T: Scalar> PivotedLuFactors<T> {
    pub(crate) fn new(factors: LuFactors<T>, permutation: Permutation) -> Self {
        Self {
            factors,
            permutation,
        }
    }

    pub fn factors(&self) -> &LuFactors<T> {
        &self.factors
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Multiplies the factors back together, giving `P·A` (not `A`).
    pub fn reconstruct(&self) -> Result<DenseMatrix<T>> {
        self.factors.reconstruct()
    }
}

impl<T: Scalar> Matrix for PivotedLuFactors<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        self.factors.dims()
    }
}

impl<T: Scalar> LuSolve<T> for PivotedLuFactors<T> {
    fn dim(&self) -> usize {
        self.factors.dim()
    }

    fn solve_into(&self, b: &[T], x: &mut [T]) -> Result<()> {
        check_vector_len("b", b.len(), self.dim())?;
        let pb = self.permutation.apply(b)?;
        self.factors.solve_into(&pb, x)
    }
}
