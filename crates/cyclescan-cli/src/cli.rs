//! Clap CLI definition: root struct and subcommands.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Root of the `cyclescan` command line.
#[derive(Parser)]
#[command(
    name = "cyclescan",
    about = "Random directed-graph synthesis and matrix-encoding cycle benchmarks",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// All top-level subcommands exposed by the `cyclescan` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Generate the built-in corpus of random graphs into a directory.
    ///
    /// Sizes follow the compiled-in power-law schedule; each graph is
    /// written as `<node count>_<content hash>.json`, so filenames sort by
    /// size and identical graphs deduplicate naturally.
    Generate {
        /// Output directory (created if missing).
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
        /// Random seed; a fixed seed reproduces the corpus exactly.
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Benchmark cycle detection across all matrix encodings over a
    /// directory of graph documents.
    ///
    /// Documents are processed in lexicographic filename order; the report
    /// streams to stdout one row per graph.
    Bench {
        /// Directory of `.json` graph documents.
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}
