//! Compressed sparse row encoding (`csr`).
//!
//! Three arrays: `row_ptr` (length n+1) delimits each row's slice of
//! `cols`/`vals`. Rows stream contiguously, so the row-times-matrix
//! multiplication uses a dense accumulator per output row and touches only
//! nonzero entries.

use crate::encodings::{TransitionStore, pow_by_squaring};
use crate::matrix::TransitionMatrix;

/// CSR matrix. Column indices are sorted within each row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrStore {
    n: usize,
    row_ptr: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
}

/// Registry entry point.
pub fn build(matrix: &TransitionMatrix) -> Box<dyn TransitionStore> {
    Box::new(CsrStore::from_matrix(matrix))
}

impl CsrStore {
    /// Builds from triplets in one pass. Triplets arrive in `(row, col)`
    /// order from the matrix builder, so columns within a row land sorted
    /// and duplicate coordinates sit adjacent; duplicates accumulate.
    pub fn from_matrix(matrix: &TransitionMatrix) -> Self {
        let n = matrix.n;
        let mut row_ptr = vec![0usize; n + 1];
        let mut cols = Vec::with_capacity(matrix.triplets.len());
        let mut vals = Vec::with_capacity(matrix.triplets.len());

        let mut current_row = 0usize;
        for t in &matrix.triplets {
            debug_assert!(t.row >= current_row, "triplets not row-ordered");
            while current_row < t.row {
                row_ptr[current_row + 1] = cols.len();
                current_row += 1;
            }
            if cols.len() > row_ptr[current_row] && cols.last() == Some(&t.col) {
                if let Some(v) = vals.last_mut() {
                    *v += t.value;
                }
            } else {
                cols.push(t.col);
                vals.push(t.value);
            }
        }
        while current_row < n {
            row_ptr[current_row + 1] = cols.len();
            current_row += 1;
        }

        CsrStore {
            n,
            row_ptr,
            cols,
            vals,
        }
    }

    fn identity(n: usize) -> Self {
        CsrStore {
            n,
            row_ptr: (0..=n).collect(),
            cols: (0..n).collect(),
            vals: vec![1.0; n],
        }
    }

    /// Sparse-sparse multiply via a per-row dense accumulator (the classic
    /// SMMP gather). Output columns are emitted sorted for determinism.
    fn multiply(&self, rhs: &CsrStore) -> CsrStore {
        let n = self.n;
        let mut acc = vec![0.0f64; n];
        let mut seen = vec![false; n];
        let mut touched: Vec<usize> = Vec::new();

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut cols = Vec::new();
        let mut vals = Vec::new();
        row_ptr.push(0);

        for i in 0..n {
            for idx in self.row_ptr[i]..self.row_ptr[i + 1] {
                let k = self.cols[idx];
                let a = self.vals[idx];
                for jdx in rhs.row_ptr[k]..rhs.row_ptr[k + 1] {
                    let j = rhs.cols[jdx];
                    if !seen[j] {
                        seen[j] = true;
                        touched.push(j);
                    }
                    acc[j] += a * rhs.vals[jdx];
                }
            }
            touched.sort_unstable();
            for &j in &touched {
                cols.push(j);
                vals.push(acc[j]);
                acc[j] = 0.0;
                seen[j] = false;
            }
            touched.clear();
            row_ptr.push(cols.len());
        }

        CsrStore {
            n,
            row_ptr,
            cols,
            vals,
        }
    }
}

impl TransitionStore for CsrStore {
    fn matpow(&self, exp: usize) -> Box<dyn TransitionStore> {
        if exp == 0 {
            return Box::new(CsrStore::identity(self.n));
        }
        Box::new(pow_by_squaring(self, exp, &CsrStore::multiply))
    }

    fn total_sum(&self) -> f64 {
        self.vals.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::matrix::Triplet;

    fn matrix(n: usize, entries: &[(usize, usize, f64)]) -> TransitionMatrix {
        TransitionMatrix {
            n,
            triplets: entries
                .iter()
                .map(|&(row, col, value)| Triplet { value, row, col })
                .collect(),
        }
    }

    #[test]
    fn layout_matches_hand_computed_pointers() {
        let s = CsrStore::from_matrix(&matrix(
            3,
            &[(0, 1, 0.5), (0, 2, 0.5), (2, 0, 1.0)],
        ));
        assert_eq!(s.row_ptr, [0, 2, 2, 3]);
        assert_eq!(s.cols, [1, 2, 0]);
        assert_eq!(s.vals, [0.5, 0.5, 1.0]);
    }

    #[test]
    fn multiply_matches_hand_computed_product() {
        // A = chain 0->1->2 with weights 2 and 3; A^2 has a single entry
        // (0, 2) = 6.
        let a = CsrStore::from_matrix(&matrix(3, &[(0, 1, 2.0), (1, 2, 3.0)]));
        let sq = a.multiply(&a);
        assert_eq!(sq.row_ptr, [0, 1, 1, 1]);
        assert_eq!(sq.cols, [2]);
        assert_eq!(sq.vals, [6.0]);
    }

    #[test]
    fn identity_power_keeps_the_sum() {
        let s = CsrStore::from_matrix(&matrix(4, &[(0, 1, 1.0), (1, 0, 1.0)]));
        assert_eq!(s.matpow(1).total_sum(), 2.0);
        assert_eq!(s.matpow(0).total_sum(), 4.0);
    }
}
