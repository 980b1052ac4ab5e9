//! Property tests: addressing round-trips and cross-encoding verdict
//! agreement against an independent petgraph oracle, on arbitrary small
//! graphs with integer-friendly weights.
#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use cyclescan_core::{
    AdjacencyDocument, GridAddressing, bench_document, build_transition_matrix, detect,
    representation_bank,
};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;

/// Builds a document over nodes `n0..n{n-1}` from an n×n adjacency mask
/// with the diagonal cleared (documents carry no self-loops).
fn document_from_mask(mask: &[Vec<bool>]) -> AdjacencyDocument {
    let n = mask.len();
    let name = |k: usize| format!("n{k:03}");
    let map: BTreeMap<String, Vec<String>> = (0..n)
        .map(|i| {
            let successors = (0..n)
                .filter(|&j| j != i && mask[i][j])
                .map(name)
                .collect();
            (name(i), successors)
        })
        .collect();
    AdjacencyDocument::from_map(map)
}

fn oracle_verdict(mask: &[Vec<bool>]) -> bool {
    let n = mask.len();
    let mut graph = DiGraph::<(), ()>::new();
    let nodes: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
    for i in 0..n {
        for j in 0..n {
            if i != j && mask[i][j] {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    is_cyclic_directed(&graph)
}

fn adjacency_mask() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..8).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n)
    })
}

proptest! {
    #[test]
    fn encode_decode_round_trips(size in 1usize..40, i in 0usize..40, j in 0usize..40) {
        let addr = GridAddressing::new(size);
        if i < size && j < size {
            let id = addr.encode(i, j).expect("in range");
            prop_assert_eq!(addr.decode(&id).expect("round-trips"), (i, j));
        } else {
            prop_assert!(addr.encode(i, j).is_err());
        }
    }

    #[test]
    fn all_encodings_agree_with_the_oracle(mask in adjacency_mask()) {
        let doc = document_from_mask(&mask);
        let expected = oracle_verdict(&mask);
        let matrix = build_transition_matrix(&doc).expect("valid document");

        let verdicts: Vec<(&str, bool)> = representation_bank()
            .into_iter()
            .map(|(name, builder)| (name, detect(builder, &matrix).has_cycles))
            .collect();

        for (name, verdict) in &verdicts {
            prop_assert_eq!(*verdict, expected, "{} disagrees with oracle", name);
        }

        // And the runner accepts the agreement.
        let row = bench_document(&doc).expect("no disagreement");
        prop_assert_eq!(row.has_cycles, expected);
    }
}
