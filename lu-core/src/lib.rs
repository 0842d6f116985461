//! # LU Core Library
//!
//! Provides the core data structures shared by the dense LU solvers: the
//! column-major [`DenseMatrix`], the error type, the numeric traits and the
//! generators used to build well-conditioned test systems.

// Declare modules
pub mod dense_matrix;
pub mod error;
pub mod generators;
pub mod traits;
pub mod vector;

// Re-export public types
pub use dense_matrix::DenseMatrix;
pub use error::{LuCoreError, Result};
pub use traits::{Matrix, Scalar};
pub use vector::{norm_inf, residual_norm_inf};
