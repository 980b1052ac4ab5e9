//! Transition-matrix construction from an adjacency document.
//!
//! Row i of the matrix is the uniform distribution over node i's
//! successors: `1/out-degree(i)` per successor, a zero row for sinks. The
//! matrix is carried as generic sparse triplets; the encodings in
//! [`crate::encodings`] each convert the triplets into their concrete
//! storage layout.

use std::collections::HashMap;
use std::fmt;

use crate::document::AdjacencyDocument;

// ---------------------------------------------------------------------------
// MatrixError
// ---------------------------------------------------------------------------

/// A document cannot be converted into a transition matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// A successor id does not appear among the document's node keys.
    /// The document is malformed; processing of this graph stops.
    UnknownSuccessor {
        /// Node whose successor list holds the dangling reference.
        node: String,
        /// The unknown successor id.
        successor: String,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::UnknownSuccessor { node, successor } => {
                write!(f, "node {node} references unknown successor {successor}")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

// ---------------------------------------------------------------------------
// TransitionMatrix
// ---------------------------------------------------------------------------

/// One nonzero matrix entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet {
    /// Entry value, `1/out-degree(row)`.
    pub value: f64,
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

/// An n×n row-stochastic matrix in triplet form. Triplets are ordered by
/// `(row, col)` because they are produced by walking the sorted document.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    /// Matrix dimension (node count).
    pub n: usize,
    /// The nonzero entries.
    pub triplets: Vec<Triplet>,
}

/// Builds the transition matrix for `doc`. Node indices follow the
/// document's sorted key order, so the mapping is deterministic.
///
/// # Errors
///
/// [`MatrixError::UnknownSuccessor`] on the first dangling successor
/// reference.
pub fn build_transition_matrix(doc: &AdjacencyDocument) -> Result<TransitionMatrix, MatrixError> {
    let index: HashMap<&String, usize> = doc
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (id, i))
        .collect();

    let mut triplets = Vec::new();
    for (i, (node, successors)) in doc.iter().enumerate() {
        if successors.is_empty() {
            continue;
        }
        let weight = 1.0 / successors.len() as f64;
        for succ in successors {
            let j = *index
                .get(succ)
                .ok_or_else(|| MatrixError::UnknownSuccessor {
                    node: node.clone(),
                    successor: succ.clone(),
                })?;
            triplets.push(Triplet {
                value: weight,
                row: i,
                col: j,
            });
        }
    }

    Ok(TransitionMatrix {
        n: doc.node_count(),
        triplets,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
