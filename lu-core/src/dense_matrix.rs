use std::ops::{Index, IndexMut};

use crate::error::{LuCoreError, Result};
use crate::traits::{Matrix, Scalar};

/// Represents a dense matrix stored in column-major order on the CPU.
///
/// Element `(row, col)` lives at offset `row + col * rows`, so walking down a
/// column is unit stride and walking along a row is stride `rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<T>, // Data stored column-major: data[col * rows + row]
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a new DenseMatrix from raw data, dimensions, assuming column-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a new DenseMatrix filled with zeros.
    ///
    /// # Panics
    /// Panics like `Vec` does if `rows * cols` elements cannot be allocated.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows.saturating_mul(cols)],
        }
    }

    /// Creates the n x n identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }

    /// Builds a matrix by evaluating `f(row, col)` for every element.
    ///
    /// # Panics
    /// Panics like `Vec` does if `rows * cols` elements cannot be allocated.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows.saturating_mul(cols));
        for c in 0..cols {
            for r in 0..rows {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Builds a matrix from a list of rows, the way matrices are usually written down.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Row {} has length {} but row 0 has length {}",
                i,
                row.len(),
                cols
            )));
        }
        Ok(Self::from_fn(rows.len(), cols, |r, c| rows[r][c]))
    }

    /// Returns a slice view of the underlying column-major data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice view of the underlying column-major data.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the matrix and hands back its storage without copying.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Gets the element at the specified row and column.
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row + col * self.rows)
        } else {
            None
        }
    }

    /// Gets the element at the specified row and column (mutable).
    /// Returns None if indices are out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row + col * self.rows)
        } else {
            None
        }
    }

    /// Column `col` as a contiguous slice.
    pub fn col(&self, col: usize) -> &[T] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }

    pub fn col_mut(&mut self, col: usize) -> &mut [T] {
        &mut self.data[col * self.rows..(col + 1) * self.rows]
    }

    /// Computes `y = self * x`.
    pub fn mul_vec(&self, x: &[T]) -> Result<Vec<T>> {
        if x.len() != self.cols {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Matrix columns ({}) must match vector length ({})",
                self.cols,
                x.len()
            )));
        }
        let mut y = vec![T::zero(); self.rows];
        // Column-oriented axpy keeps the inner loop unit stride.
        for (column, &xc) in self.data.chunks_exact(self.rows.max(1)).zip(x) {
            for (yi, &a) in y.iter_mut().zip(column) {
                *yi = *yi + a * xc;
            }
        }
        Ok(y)
    }

    /// Computes the product `self * other`.
    pub fn matmul(&self, other: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.cols != other.rows {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Cannot multiply {}x{} by {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut out = DenseMatrix::zeros(self.rows, other.cols);
        for c in 0..other.cols {
            let product = self.mul_vec(other.col(c))?;
            out.col_mut(c).copy_from_slice(&product);
        }
        Ok(out)
    }

    /// Infinity norm: the largest absolute row sum.
    ///
    /// Walks each row in place (stride `rows`), so it does not allocate.
    pub fn norm_inf(&self) -> T {
        (0..self.rows)
            .map(|r| {
                self.data
                    .get(r..)
                    .unwrap_or_default()
                    .iter()
                    .step_by(self.rows)
                    .fold(T::zero(), |sum, a| sum + a.abs())
            })
            .fold(T::zero(), T::max)
    }

    /// Largest absolute entry, zero for an empty matrix.
    pub fn max_abs(&self) -> T {
        self.data.iter().fold(T::zero(), |m, a| m.max(a.abs()))
    }

    /// Largest elementwise absolute difference between two matrices of equal shape.
    pub fn max_abs_diff(&self, other: &DenseMatrix<T>) -> Result<T> {
        if self.dims() != other.dims() {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Cannot compare {}x{} with {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| (a - b).abs())
            .fold(T::zero(), T::max))
    }
}

impl<T: Scalar> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &self.data[row + col * self.rows]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &mut self.data[row + col * self.rows]
    }
}

// Implement the generic Matrix trait
impl<T: Scalar> Matrix for DenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    // rows(), cols(), is_square() are provided by default impls in the trait
}
