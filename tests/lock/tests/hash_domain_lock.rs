//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. The domain set is exactly the five expected separators, byte for byte
//! 2. No two domains share separator bytes
//! 3. Production source spells out `BISECT::` separators only in `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bisect_kernel::proof::hash_domain::HashDomain;

const EXPECTED: &[(&str, &[u8])] = &[
    ("Sequence", b"BISECT::SEQUENCE::V1\0"),
    ("StepLog", b"BISECT::STEP_LOG::V1\0"),
    ("RunRecord", b"BISECT::RUN_RECORD::V1\0"),
    ("PlaybackConfig", b"BISECT::PLAYBACK_CONFIG::V1\0"),
    ("BenchInput", b"BISECT::BENCH_INPUT::V1\0"),
];

#[test]
fn domain_set_is_locked() {
    let actual: Vec<(&str, &[u8])> = HashDomain::ALL
        .iter()
        .map(|d| (d.name(), d.as_bytes()))
        .collect();
    assert_eq!(
        actual, EXPECTED,
        "hash domains changed; every existing digest changes with them"
    );
}

#[test]
fn domain_bytes_are_unique() {
    let unique: BTreeSet<&[u8]> = HashDomain::ALL.iter().map(HashDomain::as_bytes).collect();
    assert_eq!(unique.len(), HashDomain::ALL.len());
}

/// Source text before the first `#[cfg(test)]`; test modules sit at file end.
fn production_text(path: &Path) -> String {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match content.find("#[cfg(test)]") {
        Some(cut) => content[..cut].to_string(),
        None => content,
    }
}

fn rust_files(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            rust_files(&path, found);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            found.push(path);
        }
    }
}

#[test]
fn separator_literals_live_in_one_file() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut files = Vec::new();
    for crate_dir in ["kernel", "search", "harness"] {
        let src = root.join(crate_dir).join("src");
        assert!(src.is_dir(), "missing source dir {}", src.display());
        rust_files(&src, &mut files);
    }

    let violations: Vec<String> = files
        .iter()
        .filter(|path| path.file_name().is_some_and(|n| n != "hash_domain.rs"))
        .flat_map(|path| {
            production_text(path)
                .lines()
                .enumerate()
                .filter(|(_, line)| {
                    let line = line.trim_start();
                    !line.starts_with("//") && line.contains("b\"BISECT::")
                })
                .map(|(i, line)| format!("  {}:{}: {}", path.display(), i + 1, line.trim()))
                .collect::<Vec<_>>()
        })
        .collect();

    assert!(
        violations.is_empty(),
        "raw BISECT:: separators outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}
