//! Compressed sparse column encoding (`csc`).
//!
//! The transpose-flavoured twin of CSR: `col_ptr` (length n+1) delimits
//! each column's slice of `rows`/`vals`. Multiplication proceeds column by
//! column of the right-hand side, accumulating scaled columns of the
//! left-hand side.

use crate::encodings::{TransitionStore, pow_by_squaring};
use crate::matrix::TransitionMatrix;

/// CSC matrix. Row indices are sorted within each column.
#[derive(Debug, Clone, PartialEq)]
pub struct CscStore {
    n: usize,
    col_ptr: Vec<usize>,
    rows: Vec<usize>,
    vals: Vec<f64>,
}

/// Registry entry point.
pub fn build(matrix: &TransitionMatrix) -> Box<dyn TransitionStore> {
    Box::new(CscStore::from_matrix(matrix))
}

impl CscStore {
    /// Builds by column counting, prefix sums, and a scatter pass. The
    /// triplets are row-ordered, so scattering preserves ascending row
    /// order inside each column. Duplicate coordinates accumulate into
    /// separate stored entries, which every reduction here tolerates.
    pub fn from_matrix(matrix: &TransitionMatrix) -> Self {
        let n = matrix.n;
        let mut col_ptr = vec![0usize; n + 1];
        for t in &matrix.triplets {
            col_ptr[t.col + 1] += 1;
        }
        for j in 0..n {
            col_ptr[j + 1] += col_ptr[j];
        }

        let mut rows = vec![0usize; matrix.triplets.len()];
        let mut vals = vec![0.0f64; matrix.triplets.len()];
        let mut next = col_ptr.clone();
        for t in &matrix.triplets {
            let slot = next[t.col];
            rows[slot] = t.row;
            vals[slot] = t.value;
            next[t.col] += 1;
        }

        CscStore {
            n,
            col_ptr,
            rows,
            vals,
        }
    }

    fn identity(n: usize) -> Self {
        CscStore {
            n,
            col_ptr: (0..=n).collect(),
            rows: (0..n).collect(),
            vals: vec![1.0; n],
        }
    }

    /// Column-wise sparse multiply: output column j combines the columns
    /// of `self` selected by the nonzeros of `rhs`'s column j.
    fn multiply(&self, rhs: &CscStore) -> CscStore {
        let n = self.n;
        let mut acc = vec![0.0f64; n];
        let mut seen = vec![false; n];
        let mut touched: Vec<usize> = Vec::new();

        let mut col_ptr = Vec::with_capacity(n + 1);
        let mut rows = Vec::new();
        let mut vals = Vec::new();
        col_ptr.push(0);

        for j in 0..n {
            for kdx in rhs.col_ptr[j]..rhs.col_ptr[j + 1] {
                let k = rhs.rows[kdx];
                let b = rhs.vals[kdx];
                for idx in self.col_ptr[k]..self.col_ptr[k + 1] {
                    let i = self.rows[idx];
                    if !seen[i] {
                        seen[i] = true;
                        touched.push(i);
                    }
                    acc[i] += self.vals[idx] * b;
                }
            }
            touched.sort_unstable();
            for &i in &touched {
                rows.push(i);
                vals.push(acc[i]);
                acc[i] = 0.0;
                seen[i] = false;
            }
            touched.clear();
            col_ptr.push(rows.len());
        }

        CscStore {
            n,
            col_ptr,
            rows,
            vals,
        }
    }
}

impl TransitionStore for CscStore {
    fn matpow(&self, exp: usize) -> Box<dyn TransitionStore> {
        if exp == 0 {
            return Box::new(CscStore::identity(self.n));
        }
        Box::new(pow_by_squaring(self, exp, &CscStore::multiply))
    }

    fn total_sum(&self) -> f64 {
        self.vals.iter().sum()
    }
}
