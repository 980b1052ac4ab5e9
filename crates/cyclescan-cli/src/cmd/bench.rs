//! Implementation of `cyclescan bench <dir>`.
//!
//! Discovers `.json` graph documents in lexicographic filename order and
//! streams the benchmark report to stdout: the header first, then one row
//! per graph, flushed immediately so a live consumer observes progress.
//!
//! Per-graph failures never abort the run:
//! - an unreadable or malformed document is reported to stderr and
//!   skipped;
//! - an encoding disagreement is surfaced as a flagged row (verdict field
//!   `?`) plus a stderr note — never silently resolved.
//!
//! Exit codes: 0 = at least one graph processed, 1 = none could be,
//! 2 = the directory could not be read.

use std::io::Write;
use std::path::Path;

use cyclescan_core::{AdjacencyDocument, BenchError, bench_document, report_header};

use crate::error::CliError;
use crate::io;

/// Runs the `bench` command.
pub fn run(dir: &Path) -> Result<(), CliError> {
    let files = io::list_documents(dir)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &report_header())?;

    let mut processed = 0usize;
    for path in &files {
        let text = match io::read_file(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("skipping {}: {e}", path.display());
                continue;
            }
        };
        let doc = match AdjacencyDocument::parse(&text) {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("skipping {}: {e}", path.display());
                continue;
            }
        };

        match bench_document(&doc) {
            Ok(row) => {
                emit(&mut out, &row.format())?;
                processed += 1;
            }
            Err(BenchError::Malformed(e)) => {
                eprintln!("skipping {}: {e}", path.display());
            }
            Err(BenchError::Disagreement {
                node_count,
                verdicts,
            }) => {
                // Flagged row: the verdict field becomes `?`, the timings
                // keep the row's shape for tabular consumers.
                let mut fields = vec![node_count.to_string()];
                fields.extend(
                    verdicts
                        .iter()
                        .map(|(_, _, d)| format!("{:.6}", d.as_secs_f64())),
                );
                fields.push("?".to_owned());
                emit(&mut out, &fields.join(";"))?;

                let detail: Vec<String> = verdicts
                    .iter()
                    .map(|(name, verdict, _)| format!("{name}={}", u8::from(*verdict)))
                    .collect();
                eprintln!(
                    "{}: encodings disagree on {node_count}-node graph: {}",
                    path.display(),
                    detail.join(" ")
                );
                processed += 1;
            }
        }
    }

    if processed == 0 && !files.is_empty() {
        return Err(CliError::NothingProcessed);
    }
    Ok(())
}

/// Writes one report line and flushes, so rows appear incrementally.
fn emit(out: &mut impl Write, line: &str) -> Result<(), CliError> {
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        })
}
