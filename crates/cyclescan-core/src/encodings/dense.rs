//! Dense row-major array encoding (`arr`).
//!
//! Stores every entry, zeros included, in one contiguous `Vec<f64>`. The
//! baseline encoding: structurally trivial, cache-friendly multiplication,
//! O(n²) memory regardless of sparsity.

use crate::encodings::{TransitionStore, pow_by_squaring};
use crate::matrix::TransitionMatrix;

/// Dense n×n matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStore {
    n: usize,
    data: Vec<f64>,
}

/// Registry entry point.
pub fn build(matrix: &TransitionMatrix) -> Box<dyn TransitionStore> {
    Box::new(DenseStore::from_matrix(matrix))
}

impl DenseStore {
    /// Scatters triplets into the dense array. Duplicate coordinates
    /// accumulate.
    pub fn from_matrix(matrix: &TransitionMatrix) -> Self {
        let n = matrix.n;
        let mut data = vec![0.0; n * n];
        for t in &matrix.triplets {
            data[t.row * n + t.col] += t.value;
        }
        DenseStore { n, data }
    }

    fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        DenseStore { n, data }
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    fn multiply(&self, rhs: &DenseStore) -> DenseStore {
        let n = self.n;
        let mut data = vec![0.0; n * n];
        // i-k-j order: the inner loop streams a row of rhs.
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    data[i * n + j] += a * rhs.data[k * n + j];
                }
            }
        }
        DenseStore { n, data }
    }
}

impl TransitionStore for DenseStore {
    fn matpow(&self, exp: usize) -> Box<dyn TransitionStore> {
        if exp == 0 {
            return Box::new(DenseStore::identity(self.n));
        }
        Box::new(pow_by_squaring(self, exp, &DenseStore::multiply))
    }

    fn total_sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
