#![deny(clippy::print_stdout, clippy::print_stderr)]

//! Random directed-graph synthesis and matrix-power cycle detection.
//!
//! The library has two halves. Generation grows a graph over a square
//! coordinate grid via a random frontier walk ([`generate`]), emitting a
//! serializable [`AdjacencyDocument`]. Detection converts a document into a
//! row-stochastic [`TransitionMatrix`] ([`matrix`]) and decides cycle
//! presence from the sign of the total sum of its n-th power ([`detect`]),
//! benchmarking the computation across several matrix storage encodings
//! ([`encodings`], [`runner`]).
//!
//! The library performs no I/O; persistence and reporting belong to the
//! `cyclescan` binary.

pub mod addressing;
pub mod detect;
pub mod document;
pub mod encodings;
pub mod generate;
pub mod matrix;
pub mod runner;

pub use addressing::{AddressError, GridAddressing};
pub use detect::{Detection, detect};
pub use document::{AdjacencyDocument, DocumentParseError};
pub use encodings::{StoreBuilder, TransitionStore, representation_bank};
pub use generate::{
    Frontier, GenerateError, GrowthConfig, corpus_sizes, grow, grow_spanning,
};
pub use matrix::{MatrixError, TransitionMatrix, Triplet, build_transition_matrix};
pub use runner::{BenchError, ReportRow, bench_document, report_header};

/// Library version, taken from the crate manifest.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
