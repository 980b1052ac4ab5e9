//! The serializable graph form: node id → ordered list of successor ids.
//!
//! An [`AdjacencyDocument`] is the only persisted artifact of generation and
//! the only input to matrix construction. Every node of a graph appears as a
//! key, sinks included (mapped to an empty list), so the key set alone
//! defines the node universe. Persistence is plain JSON; the `BTreeMap`
//! backing keeps key order sorted so serialization is canonical and the
//! content hash below is stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// AdjacencyDocument
// ---------------------------------------------------------------------------

/// A directed graph as a sorted mapping from node id to successor ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyDocument {
    nodes: BTreeMap<String, Vec<String>>,
}

impl AdjacencyDocument {
    /// Builds a document from a node → successors mapping. Successor lists
    /// are sorted and deduplicated.
    pub fn from_map(nodes: BTreeMap<String, Vec<String>>) -> Self {
        let nodes = nodes
            .into_iter()
            .map(|(id, mut succ)| {
                succ.sort();
                succ.dedup();
                (id, succ)
            })
            .collect();
        AdjacencyDocument { nodes }
    }

    /// Number of nodes (keys) in the document.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates `(node id, successor ids)` in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.nodes.iter()
    }

    /// Successor list for `id`, if the node exists.
    pub fn successors(&self, id: &str) -> Option<&[String]> {
        self.nodes.get(id).map(Vec::as_slice)
    }

    /// Whether `id` is a node of this document.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Parses a document from its JSON text form.
    ///
    /// # Errors
    ///
    /// [`DocumentParseError`] if the text is not a JSON object of string
    /// arrays.
    pub fn parse(text: &str) -> Result<Self, DocumentParseError> {
        let nodes: BTreeMap<String, Vec<String>> =
            serde_json::from_str(text).map_err(DocumentParseError)?;
        Ok(AdjacencyDocument::from_map(nodes))
    }

    /// Serializes the document to its canonical JSON text form (sorted
    /// keys, no insignificant whitespace variation).
    pub fn to_json(&self) -> String {
        // BTreeMap<String, Vec<String>> serialization cannot fail.
        serde_json::to_string(&self.nodes).unwrap_or_default()
    }

    /// Content-addressed filename for this document:
    /// `<node count, 6 digits zero-padded>_<first 8 hex chars of the
    /// SHA-256 of the JSON body>.json`.
    ///
    /// Sorting such filenames lexicographically sorts a corpus by size, and
    /// identical graphs collapse to one file.
    pub fn content_name(&self) -> String {
        let body = self.to_json();
        let digest = Sha256::digest(body.as_bytes());
        let mut hash_prefix = String::with_capacity(8);
        for byte in digest.iter().take(4) {
            hash_prefix.push_str(&format!("{byte:02x}"));
        }
        format!("{:06}_{}.json", self.node_count(), hash_prefix)
    }
}

// ---------------------------------------------------------------------------
// DocumentParseError
// ---------------------------------------------------------------------------

/// A persisted graph document is not structurally valid JSON of the
/// expected shape.
#[derive(Debug)]
pub struct DocumentParseError(serde_json::Error);

impl fmt::Display for DocumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed graph document: {}", self.0)
    }
}

impl std::error::Error for DocumentParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
