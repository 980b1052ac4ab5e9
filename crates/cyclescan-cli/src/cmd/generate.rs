//! Implementation of `cyclescan generate --out <dir> [--seed <n>]`.
//!
//! Walks the compiled-in power-law size schedule, grows one graph per
//! size, and writes each as `<6-digit node count>_<8-hex content
//! hash>.json` into the output directory. A generation failure (a broken
//! frontier invariant) aborts only that graph: it is reported to stderr
//! and the schedule continues.
//!
//! Output (stdout): one line per written graph, `wrote <filename>`.
//! Exit codes: 0 = success, 2 = output directory not writable.

use std::path::Path;

use cyclescan_core::{GrowthConfig, corpus_sizes, grow};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::CliError;
use crate::io;

/// Runs the `generate` command.
///
/// The whole corpus derives from one seeded [`StdRng`], so a fixed `seed`
/// reproduces every file byte for byte.
pub fn run(out: &Path, seed: u64) -> Result<(), CliError> {
    io::ensure_dir(out)?;
    let mut rng = StdRng::seed_from_u64(seed);

    for size in corpus_sizes() {
        let config = GrowthConfig::for_size(size);
        let doc = match grow(&config, &mut rng) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("skipping size {size}: {e}");
                continue;
            }
        };
        let name = doc.content_name();
        io::write_file(&out.join(&name), &doc.to_json())?;
        println!("wrote {name}");
    }
    Ok(())
}
