use bytemuck::{Pod, Zeroable};
use num_traits::{Float, NumCast};
use std::fmt::Debug;

/// Floating-point element type accepted by the factorization kernels.
///
/// Blanket-implemented for every `Float` that is also plain-old-data, which in
/// practice means `f32` and `f64`.
pub trait Scalar: Float + Debug + Default + Pod + Zeroable + Send + Sync + 'static {
    /// Converts an `f64` constant into `Self`, yielding NaN if it cannot be represented.
    fn from_f64_lossy(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Widens `self` to `f64` for error reporting.
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T> Scalar for T where T: Float + Debug + Default + Pod + Zeroable + Send + Sync + 'static {}

/// Generic trait representing a matrix.
/// Implementations can hold raw or factorized storage.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements (e.g., f32, f64).
    type Value: Copy + Debug + Default + Pod + Zeroable;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }
}
