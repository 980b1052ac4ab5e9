//! The representation bank: matrix storage/compute encodings.
//!
//! Each encoding converts generic sparse triplets into a concrete layout
//! and supports the two capabilities cycle detection needs: integer matrix
//! power (repeated self-multiplication) and total-entry-sum reduction.
//! Shipped encodings:
//!
//! - `arr` — dense row-major array ([`dense`])
//! - `bsr` — block sparse row, fixed block edge ([`bsr`])
//! - `csc` — compressed sparse column ([`csc`])
//! - `csr` — compressed sparse row ([`csr`])
//!
//! The registry is a name-keyed `BTreeMap`, so iterating it visits
//! encodings in sorted-name order and benchmark output is reproducible.

pub mod bsr;
pub mod csc;
pub mod csr;
pub mod dense;

use std::collections::BTreeMap;

use crate::matrix::TransitionMatrix;

// ---------------------------------------------------------------------------
// TransitionStore
// ---------------------------------------------------------------------------

/// Capability interface every matrix encoding provides.
pub trait TransitionStore {
    /// Raises the matrix to the `exp`-th integer power. `exp == 0` yields
    /// the identity, `exp == 1` a copy.
    fn matpow(&self, exp: usize) -> Box<dyn TransitionStore>;

    /// Sum of every stored entry.
    fn total_sum(&self) -> f64;
}

/// Conversion from triplet form into one concrete encoding.
pub type StoreBuilder = fn(&TransitionMatrix) -> Box<dyn TransitionStore>;

/// The fixed registry of shipped encodings, keyed by report name. Extend by
/// inserting another builder; iteration order stays sorted by name.
pub fn representation_bank() -> BTreeMap<&'static str, StoreBuilder> {
    BTreeMap::from([
        ("arr", dense::build as StoreBuilder),
        ("bsr", bsr::build as StoreBuilder),
        ("csc", csc::build as StoreBuilder),
        ("csr", csr::build as StoreBuilder),
    ])
}

// ---------------------------------------------------------------------------
// Shared power loop
// ---------------------------------------------------------------------------

/// Exponentiation by squaring for `exp >= 1`. The multiply is supplied by
/// the concrete encoding.
pub(crate) fn pow_by_squaring<M: Clone>(base: &M, exp: usize, mul: &dyn Fn(&M, &M) -> M) -> M {
    debug_assert!(exp >= 1);
    let mut result = base.clone();
    let mut square = base.clone();
    let mut remaining = exp - 1;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul(&result, &square);
        }
        remaining >>= 1;
        if remaining > 0 {
            square = mul(&square, &square);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
