//! Cycle detection via the matrix-power identity.
//!
//! In an n-node directed graph with no cycle every simple path has length
//! at most n−1, so the n-th power of its nonnegative weighted adjacency
//! matrix is exactly zero: a walk of length n would have to revisit a node.
//! Any cycle, conversely, admits arbitrarily long walks of strictly
//! positive weight, so some entry of Mⁿ stays positive. The verdict is
//! therefore `total_sum(Mⁿ) > 0`.
//!
//! Caveat: the weights are floating-point products along walks up to n
//! edges long, so an extremely low-probability walk can underflow to zero
//! and produce a false negative. This is a documented accuracy limit of
//! the method, not an error condition, and nothing here corrects for it.

use std::time::{Duration, Instant};

use crate::encodings::StoreBuilder;
use crate::matrix::TransitionMatrix;

/// Outcome of one timed detection run under one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Whether the graph contains at least one directed cycle.
    pub has_cycles: bool,
    /// Wall-clock time of conversion + power + sum. Informational only;
    /// never influences the verdict.
    pub elapsed: Duration,
}

/// Runs cycle detection on `matrix` through the encoding produced by
/// `builder`, timing the full span the encoding is responsible for:
/// triplet conversion, the n-th power, and the sum reduction.
///
/// Graphs with n ≤ 1 cannot contain a cycle (self-loops are excluded by
/// construction) and report `false` immediately.
pub fn detect(builder: StoreBuilder, matrix: &TransitionMatrix) -> Detection {
    let start = Instant::now();
    let has_cycles = if matrix.n <= 1 {
        false
    } else {
        let store = builder(matrix);
        store.matpow(matrix.n).total_sum() > 0.0
    };
    Detection {
        has_cycles,
        elapsed: start.elapsed(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::collections::BTreeMap;

    use super::*;
    use crate::document::AdjacencyDocument;
    use crate::encodings::representation_bank;
    use crate::matrix::build_transition_matrix;

    fn doc(entries: &[(&str, &[&str])]) -> AdjacencyDocument {
        let map: BTreeMap<String, Vec<String>> = entries
            .iter()
            .map(|(id, succ)| {
                (
                    (*id).to_owned(),
                    succ.iter().map(|s| (*s).to_owned()).collect(),
                )
            })
            .collect();
        AdjacencyDocument::from_map(map)
    }

    fn verdicts(entries: &[(&str, &[&str])]) -> Vec<(&'static str, bool)> {
        let matrix = build_transition_matrix(&doc(entries)).expect("builds");
        representation_bank()
            .into_iter()
            .map(|(name, builder)| (name, detect(builder, &matrix).has_cycles))
            .collect()
    }

    #[test]
    fn single_node_reports_no_cycle() {
        // Scenario: one sink node.
        for (name, verdict) in verdicts(&[("a", &[])]) {
            assert!(!verdict, "{name}");
        }
    }

    #[test]
    fn three_node_chain_reports_no_cycle() {
        for (name, verdict) in verdicts(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]) {
            assert!(!verdict, "{name}");
        }
    }

    #[test]
    fn three_node_ring_reports_a_cycle() {
        for (name, verdict) in verdicts(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]) {
            assert!(verdict, "{name}");
        }
    }

    #[test]
    fn back_edge_flips_the_verdict() {
        let acyclic: &[(&str, &[&str])] =
            &[("a", &["b"]), ("b", &["c"]), ("c", &["d"]), ("d", &[])];
        for (name, verdict) in verdicts(acyclic) {
            assert!(!verdict, "{name} before back edge");
        }
        let with_back_edge: &[(&str, &[&str])] =
            &[("a", &["b"]), ("b", &["c"]), ("c", &["d"]), ("d", &["b"])];
        for (name, verdict) in verdicts(with_back_edge) {
            assert!(verdict, "{name} after back edge");
        }
    }

    #[test]
    fn all_encodings_agree_on_a_dense_tangle() {
        let tangle: &[(&str, &[&str])] = &[
            ("a", &["b", "c"]),
            ("b", &["d"]),
            ("c", &["d", "e"]),
            ("d", &["e"]),
            ("e", &[]),
        ];
        let results = verdicts(tangle);
        assert!(results.iter().all(|(_, v)| !v), "{results:?}");
    }

    #[test]
    fn empty_graph_reports_no_cycle() {
        let matrix = build_transition_matrix(&doc(&[])).expect("builds");
        for (name, builder) in representation_bank() {
            assert!(!detect(builder, &matrix).has_cycles, "{name}");
        }
    }
}
