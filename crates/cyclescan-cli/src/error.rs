//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `cyclescan` binary.
//! Every variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input failure: an argument or input could not be
//!   read at all, before any domain logic ran.
//! - Exit code **1** — logical failure: the run completed but produced a
//!   well-defined failure (for example, no document in the corpus could be
//!   processed).
//!
//! Per-graph failures (malformed documents, generation invariant breaches,
//! encoding disagreements) are *not* represented here: they are isolated,
//! reported on the output streams, and the run continues.

use std::fmt;
use std::path::PathBuf;

/// All error conditions the `cyclescan` CLI can terminate with.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A directory argument does not exist or is not a directory.
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A generic I/O failure on a named source.
    IoError {
        /// Human-readable label for the source (path or stream name).
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// Every document in the corpus failed; no report row was produced.
    NothingProcessed,
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotADirectory { .. } | CliError::IoError { .. } => 2,
            CliError::NothingProcessed => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotADirectory { path } => {
                write!(f, "not a directory: {}", path.display())
            }
            CliError::IoError { source, detail } => {
                write!(f, "I/O error on {source}: {detail}")
            }
            CliError::NothingProcessed => {
                write!(f, "no graph document could be processed")
            }
        }
    }
}

impl std::error::Error for CliError {}
