//! `lu-solver`: dense LU factorization and triangular solves.
//!
//! This library factorizes a square column-major matrix in place into a packed
//! L/U representation and solves `Ax = b` from it by forward and backward
//! substitution. The classical right-looking elimination without pivoting is
//! the default; partial pivoting is available as a separate algorithm.

// Core modules
pub mod algorithms;
pub mod lu_factors;
pub mod permutation;

pub use algorithms::{
    no_pivot::factorize_in_place, partial_pivot::factorize_partial_pivot_in_place,
    solve_dense, triangular::solve_packed, FactorizeAlgorithm, LuSolve, NoPivotLu,
    PartialPivotLu, PivotTolerance,
};
pub use lu_factors::{LuFactors, PivotedLuFactors};
pub use permutation::Permutation;

// Re-export from lu_core
pub use lu_core::{norm_inf, residual_norm_inf, DenseMatrix, LuCoreError, Matrix, Result, Scalar};
