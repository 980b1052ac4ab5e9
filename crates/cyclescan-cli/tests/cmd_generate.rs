//! Integration tests for `cyclescan generate`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `cyclescan` binary.
fn cyclescan_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_generate-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cyclescan");
    path
}

#[test]
fn generate_writes_one_file_per_schedule_size() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = Command::new(cyclescan_bin())
        .args(["generate", "--out"])
        .arg(dir.path())
        .args(["--seed", "7"])
        .output()
        .expect("run cyclescan generate");
    assert!(out.status.success(), "exit: {:?}", out.status.code());

    let files: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    // Schedule has 8 sizes; distinct graphs, so 8 distinct content names.
    assert_eq!(files.len(), 8, "files: {files:?}");
}

#[test]
fn generated_filenames_are_size_prefixed_and_content_addressed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = Command::new(cyclescan_bin())
        .args(["generate", "--out"])
        .arg(dir.path())
        .args(["--seed", "1"])
        .output()
        .expect("run cyclescan generate");
    assert!(out.status.success());

    for entry in std::fs::read_dir(dir.path()).expect("read dir") {
        let name = entry
            .expect("entry")
            .file_name()
            .to_string_lossy()
            .into_owned();
        let stem = name.strip_suffix(".json").expect("json extension");
        let (count, hash) = stem.split_once('_').expect("count_hash shape");
        assert_eq!(count.len(), 6, "name: {name}");
        assert!(count.chars().all(|c| c.is_ascii_digit()), "name: {name}");
        assert_eq!(hash.len(), 8, "name: {name}");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()), "name: {name}");
    }
}

#[test]
fn generated_documents_are_valid_json_objects_of_string_arrays() {
    let dir = tempfile::tempdir().expect("tempdir");
    Command::new(cyclescan_bin())
        .args(["generate", "--out"])
        .arg(dir.path())
        .args(["--seed", "3"])
        .output()
        .expect("run cyclescan generate");

    for entry in std::fs::read_dir(dir.path()).expect("read dir") {
        let path = entry.expect("entry").path();
        let text = std::fs::read_to_string(&path).expect("readable");
        let parsed: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        let object = parsed.as_object().expect("top-level object");
        let node_count: usize = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('_').next())
            .and_then(|c| c.parse().ok())
            .expect("size prefix");
        assert_eq!(object.len(), node_count, "{}", path.display());
        for successors in object.values() {
            assert!(successors.is_array(), "{}", path.display());
        }
    }
}

#[test]
fn same_seed_reproduces_the_corpus() {
    let dir_a = tempfile::tempdir().expect("tempdir");
    let dir_b = tempfile::tempdir().expect("tempdir");
    for dir in [&dir_a, &dir_b] {
        let out = Command::new(cyclescan_bin())
            .args(["generate", "--out"])
            .arg(dir.path())
            .args(["--seed", "99"])
            .output()
            .expect("run cyclescan generate");
        assert!(out.status.success());
    }

    let names = |d: &tempfile::TempDir| -> Vec<String> {
        let mut v: Vec<String> = std::fs::read_dir(d.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        v.sort();
        v
    };
    assert_eq!(names(&dir_a), names(&dir_b));
}
