//! Benchmark runner: one graph through every registered encoding.
//!
//! Encodings run strictly sequentially so their relative timings are not
//! distorted by resource contention. Every encoding must return the same
//! verdict — a disagreement signals an implementation or precision defect
//! and is surfaced as [`BenchError::Disagreement`], never resolved
//! silently. Report formatting follows the line-oriented
//! semicolon-delimited layout consumed downstream:
//!
//! ```text
//! #;arr;bsr;csc;csr;has_cycles
//! 25;0.000013;0.000027;0.000011;0.000010;1
//! ```
//!
//! This module never performs I/O; the CLI owns discovery and printing and
//! emits rows incrementally, one per processed graph.

use std::fmt;
use std::time::Duration;

use crate::detect::detect;
use crate::document::AdjacencyDocument;
use crate::encodings::representation_bank;
use crate::matrix::{MatrixError, build_transition_matrix};

// ---------------------------------------------------------------------------
// BenchError
// ---------------------------------------------------------------------------

/// Per-graph benchmark failure. Never aborts a corpus run: the caller
/// reports it and moves to the next graph.
#[derive(Debug)]
pub enum BenchError {
    /// The document could not become a transition matrix.
    Malformed(MatrixError),
    /// The encodings disagree on the verdict. Carries every encoding's
    /// result so the caller can emit a flagged row.
    Disagreement {
        /// Node count of the offending graph.
        node_count: usize,
        /// `(encoding name, verdict, elapsed)` per registered encoding.
        verdicts: Vec<(&'static str, bool, Duration)>,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Malformed(e) => write!(f, "malformed document: {e}"),
            BenchError::Disagreement {
                node_count,
                verdicts,
            } => {
                write!(f, "encodings disagree on {node_count}-node graph:")?;
                for (name, verdict, _) in verdicts {
                    write!(f, " {name}={}", u8::from(*verdict))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Malformed(e) => Some(e),
            BenchError::Disagreement { .. } => None,
        }
    }
}

impl From<MatrixError> for BenchError {
    fn from(e: MatrixError) -> Self {
        BenchError::Malformed(e)
    }
}

// ---------------------------------------------------------------------------
// ReportRow
// ---------------------------------------------------------------------------

/// One benchmark report row: a graph's node count, the per-encoding timing
/// in registry order, and the agreed verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// `(encoding name, elapsed)` in sorted-name order.
    pub timings: Vec<(&'static str, Duration)>,
    /// The verdict every encoding agreed on.
    pub has_cycles: bool,
}

impl ReportRow {
    /// Formats the row: `<node_count>;<secs>;…;<0|1>`, durations as
    /// fixed-point seconds with six decimals.
    pub fn format(&self) -> String {
        let mut fields = vec![self.node_count.to_string()];
        fields.extend(
            self.timings
                .iter()
                .map(|(_, d)| format!("{:.6}", d.as_secs_f64())),
        );
        fields.push(u8::from(self.has_cycles).to_string());
        fields.join(";")
    }
}

/// The report header for the current registry:
/// `#;<name>;…;has_cycles`.
pub fn report_header() -> String {
    let mut fields = vec!["#".to_owned()];
    fields.extend(representation_bank().keys().map(|name| (*name).to_owned()));
    fields.push("has_cycles".to_owned());
    fields.join(";")
}

/// Benchmarks one document across every registered encoding.
///
/// Builds the transition matrix once, then runs the encodings strictly in
/// sequence (registry order).
///
/// # Errors
///
/// - [`BenchError::Malformed`] if the document references unknown nodes.
/// - [`BenchError::Disagreement`] if the verdicts differ.
pub fn bench_document(doc: &AdjacencyDocument) -> Result<ReportRow, BenchError> {
    let matrix = build_transition_matrix(doc)?;

    let mut verdicts: Vec<(&'static str, bool, Duration)> = Vec::new();
    for (name, builder) in representation_bank() {
        let detection = detect(builder, &matrix);
        verdicts.push((name, detection.has_cycles, detection.elapsed));
    }

    let agreed = verdicts.first().map(|(_, v, _)| *v).unwrap_or(false);
    if verdicts.iter().any(|(_, v, _)| *v != agreed) {
        return Err(BenchError::Disagreement {
            node_count: matrix.n,
            verdicts,
        });
    }

    Ok(ReportRow {
        node_count: matrix.n,
        timings: verdicts.into_iter().map(|(name, _, d)| (name, d)).collect(),
        has_cycles: agreed,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
