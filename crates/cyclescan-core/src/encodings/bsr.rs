//! Block sparse row encoding (`bsr`).
//!
//! CSR over dense `EDGE`×`EDGE` blocks: `row_ptr` delimits block rows,
//! `bcols` holds block-column indices, and `blocks` stores each nonzero
//! block contiguously. The logical dimension is padded up to a multiple of
//! the block edge; padding entries are never written, stay zero through
//! multiplication, and so never affect the total sum.
//!
//! The tradeoff this encoding exposes: block-level indexing shrinks the
//! index arrays and multiplies dense sub-blocks, at the cost of storing
//! explicit zeros inside sparsely filled blocks.

use crate::encodings::{TransitionStore, pow_by_squaring};
use crate::matrix::TransitionMatrix;

/// Dense block edge length.
const EDGE: usize = 4;
/// Values per block.
const AREA: usize = EDGE * EDGE;

/// BSR matrix over 4×4 dense blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BsrStore {
    /// Logical (unpadded) dimension.
    n: usize,
    /// Number of block rows/columns.
    nb: usize,
    row_ptr: Vec<usize>,
    bcols: Vec<usize>,
    /// `bcols.len() * AREA` values, block-row-major within each block.
    blocks: Vec<f64>,
}

/// Registry entry point.
pub fn build(matrix: &TransitionMatrix) -> Box<dyn TransitionStore> {
    Box::new(BsrStore::from_matrix(matrix))
}

impl BsrStore {
    /// Groups triplets into their enclosing blocks. Duplicate coordinates
    /// accumulate.
    pub fn from_matrix(matrix: &TransitionMatrix) -> Self {
        let n = matrix.n;
        let nb = n.div_ceil(EDGE);

        let mut occupied: std::collections::BTreeMap<(usize, usize), Vec<f64>> =
            std::collections::BTreeMap::new();
        for t in &matrix.triplets {
            let block = occupied
                .entry((t.row / EDGE, t.col / EDGE))
                .or_insert_with(|| vec![0.0; AREA]);
            block[(t.row % EDGE) * EDGE + t.col % EDGE] += t.value;
        }

        let mut row_ptr = vec![0usize; nb + 1];
        let mut bcols = Vec::with_capacity(occupied.len());
        let mut blocks = Vec::with_capacity(occupied.len() * AREA);
        for (&(br, bc), values) in &occupied {
            row_ptr[br + 1] += 1;
            bcols.push(bc);
            blocks.extend_from_slice(values);
        }
        for i in 0..nb {
            row_ptr[i + 1] += row_ptr[i];
        }

        BsrStore {
            n,
            nb,
            row_ptr,
            bcols,
            blocks,
        }
    }

    /// Identity restricted to the logical dimension: diagonal entries past
    /// `n` stay zero so `matpow(0).total_sum() == n` despite padding.
    fn identity(n: usize) -> Self {
        let nb = n.div_ceil(EDGE);
        let mut row_ptr = Vec::with_capacity(nb + 1);
        let mut bcols = Vec::with_capacity(nb);
        let mut blocks = vec![0.0; nb * AREA];
        row_ptr.push(0);
        for br in 0..nb {
            bcols.push(br);
            for r in 0..EDGE {
                if br * EDGE + r < n {
                    blocks[br * AREA + r * EDGE + r] = 1.0;
                }
            }
            row_ptr.push(br + 1);
        }
        BsrStore {
            n,
            nb,
            row_ptr,
            bcols,
            blocks,
        }
    }

    /// Block-level SMMP gather: dense 4×4 multiply-accumulate per block
    /// pair, block columns emitted sorted.
    fn multiply(&self, rhs: &BsrStore) -> BsrStore {
        let nb = self.nb;
        let mut acc = vec![0.0f64; nb * AREA];
        let mut seen = vec![false; nb];
        let mut touched: Vec<usize> = Vec::new();

        let mut row_ptr = Vec::with_capacity(nb + 1);
        let mut bcols = Vec::new();
        let mut blocks = Vec::new();
        row_ptr.push(0);

        for bi in 0..nb {
            for idx in self.row_ptr[bi]..self.row_ptr[bi + 1] {
                let bk = self.bcols[idx];
                let a = &self.blocks[idx * AREA..(idx + 1) * AREA];
                for jdx in rhs.row_ptr[bk]..rhs.row_ptr[bk + 1] {
                    let bj = rhs.bcols[jdx];
                    let b = &rhs.blocks[jdx * AREA..(jdx + 1) * AREA];
                    if !seen[bj] {
                        seen[bj] = true;
                        touched.push(bj);
                    }
                    let out = &mut acc[bj * AREA..(bj + 1) * AREA];
                    for r in 0..EDGE {
                        for k in 0..EDGE {
                            let av = a[r * EDGE + k];
                            if av == 0.0 {
                                continue;
                            }
                            for c in 0..EDGE {
                                out[r * EDGE + c] += av * b[k * EDGE + c];
                            }
                        }
                    }
                }
            }
            touched.sort_unstable();
            for &bj in &touched {
                bcols.push(bj);
                blocks.extend_from_slice(&acc[bj * AREA..(bj + 1) * AREA]);
                for v in &mut acc[bj * AREA..(bj + 1) * AREA] {
                    *v = 0.0;
                }
                seen[bj] = false;
            }
            touched.clear();
            row_ptr.push(bcols.len());
        }

        BsrStore {
            n: self.n,
            nb,
            row_ptr,
            bcols,
            blocks,
        }
    }
}

impl TransitionStore for BsrStore {
    fn matpow(&self, exp: usize) -> Box<dyn TransitionStore> {
        if exp == 0 {
            return Box::new(BsrStore::identity(self.n));
        }
        Box::new(pow_by_squaring(self, exp, &BsrStore::multiply))
    }

    fn total_sum(&self) -> f64 {
        self.blocks.iter().sum()
    }
}
