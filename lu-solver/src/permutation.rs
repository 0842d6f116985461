use lu_core::{DenseMatrix, LuCoreError, Matrix, Result, Scalar};

/// Row permutation produced by pivoted factorization.
///
/// `forward[i]` is the index of the original row that ends up at position `i`,
/// i.e. `(P·b)[i] = b[forward[i]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    forward: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self {
            forward: (0..n).collect(),
        }
    }

    /// Wraps `forward`, checking that it is a permutation of `0..forward.len()`.
    pub fn from_vec(forward: Vec<usize>) -> Result<Self> {
        let mut seen = vec![false; forward.len()];
        for &p in &forward {
            match seen.get_mut(p) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return Err(LuCoreError::InvalidDimensions(format!(
                        "Index {} is out of range or repeated in a permutation of length {}",
                        p,
                        forward.len()
                    )))
                }
            }
        }
        Ok(Self { forward })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.forward
    }

    /// Returns `P·v`.
    pub fn apply<T: Copy>(&self, v: &[T]) -> Result<Vec<T>> {
        if v.len() != self.len() {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Vector length ({}) must match permutation length ({})",
                v.len(),
                self.len()
            )));
        }
        Ok(self.forward.iter().map(|&p| v[p]).collect())
    }

    /// Returns `P·A`, the rows of `a` reordered.
    pub fn permute_rows<T: Scalar>(&self, a: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if a.rows() != self.len() {
            return Err(LuCoreError::InvalidDimensions(format!(
                "Matrix rows ({}) must match permutation length ({})",
                a.rows(),
                self.len()
            )));
        }
        Ok(DenseMatrix::from_fn(a.rows(), a.cols(), |r, c| {
            a[(self.forward[r], c)]
        }))
    }
}
