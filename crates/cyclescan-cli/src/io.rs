//! Filesystem access for the `cyclescan` binary.
//!
//! The core library never touches the filesystem; every read, write, and
//! directory listing happens here, with `std::io::Error` mapped onto
//! [`CliError`] variants carrying a named source.

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Reads a whole file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Writes `content` to `path`, truncating any existing file.
pub fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content).map_err(|e| CliError::IoError {
        source: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Creates `dir` (and parents) if it does not yet exist.
pub fn ensure_dir(dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(dir).map_err(|e| CliError::IoError {
        source: dir.display().to_string(),
        detail: e.to_string(),
    })
}

/// Lists the `.json` files of `dir` in lexicographic filename order —
/// the fixed, deterministic processing order of a corpus.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !dir.is_dir() {
        return Err(CliError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|e| CliError::IoError {
        source: dir.display().to_string(),
        detail: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CliError::IoError {
            source: dir.display().to_string(),
            detail: e.to_string(),
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
