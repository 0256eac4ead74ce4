//! Canonical JSON equivalence checking.
//!
//! Both documents are loaded, brought to canonical form and compared twice:
//! once on the compact canonical serialization (the verdict), and once on
//! the sorted lines of the indented serialization (a coarser signal that
//! also yields an approximate similarity count).
//!
//! Nothing is written to disk unless [`CompareOptions::write_artifacts`] is
//! set, so an aborted comparison never leaves intermediate files behind.

mod report;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HunterError, HunterResult};
use crate::json::{canonicalize, canonicalize_with, load_pair, to_pretty, CanonicalOptions, JsonValue};

pub use report::{compare_lines, Artifacts, DiffReport, LineComparison};

/// Settings for a comparison run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Persist canonical documents and sorted-line dumps beside the inputs.
    pub write_artifacts: bool,
    /// Fixed-point iteration settings.
    pub canonical: CanonicalOptions,
}

/// Canonical documents and their sorted line dumps for one pair.
#[derive(Debug, Clone)]
pub struct CanonicalPair {
    /// Canonical trees, left then right.
    pub values: [JsonValue; 2],
    /// Sorted lines of the indented serializations, left then right.
    pub sorted_lines: [Vec<String>; 2],
}

/// Lines of the indented serialization, sorted lexicographically.
pub fn sorted_lines(value: &JsonValue) -> Vec<String> {
    let mut lines: Vec<String> = to_pretty(value)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

/// Canonicalize both trees and build their line dumps.
pub fn canonical_pair(
    left: &JsonValue,
    right: &JsonValue,
    options: CanonicalOptions,
) -> HunterResult<CanonicalPair> {
    let left = canonicalize_with(left, options)?;
    let right = canonicalize_with(right, options)?;
    let sorted = [sorted_lines(&left), sorted_lines(&right)];
    Ok(CanonicalPair {
        values: [left, right],
        sorted_lines: sorted,
    })
}

/// Equivalence verdict for two in-memory trees.
pub fn equivalent(left: &JsonValue, right: &JsonValue, options: CanonicalOptions) -> HunterResult<bool> {
    let left = canonicalize_with(left, options)?;
    let right = canonicalize_with(right, options)?;
    Ok(canonicalize(&left) == canonicalize(&right))
}

/// Path of the persisted canonical document for `input`.
///
/// `reports/a.json` becomes `reports/a_cmp.json`.
pub fn canonical_artifact_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(OsString::from)
        .unwrap_or_default();
    name.push("_cmp.json");
    input.with_file_name(name)
}

/// Path of the sorted-line dump that accompanies `document`.
pub fn line_dump_path(document: &Path) -> PathBuf {
    let mut path = document.as_os_str().to_os_string();
    path.push(".txt");
    PathBuf::from(path)
}

fn write_text(path: &Path, text: &str) -> HunterResult<()> {
    fs::write(path, text).map_err(|e| HunterError::io(path, e))
}

fn persist(inputs: [&Path; 2], pair: &CanonicalPair) -> HunterResult<Artifacts> {
    let documents = inputs.map(canonical_artifact_path);
    let line_dumps = [line_dump_path(&documents[0]), line_dump_path(&documents[1])];

    for ((doc_path, dump_path), (value, lines)) in documents
        .iter()
        .zip(&line_dumps)
        .zip(pair.values.iter().zip(&pair.sorted_lines))
    {
        write_text(doc_path, &to_pretty(value))?;
        let mut dump = String::new();
        for line in lines {
            dump.push_str(line);
            dump.push('\n');
        }
        write_text(dump_path, &dump)?;
        debug!(document = %doc_path.display(), dump = %dump_path.display(), "persisted comparison artifacts");
    }

    Ok(Artifacts {
        documents,
        line_dumps,
    })
}

/// Compare two JSON documents on disk.
///
/// Any load, parse or convergence failure aborts before a report exists,
/// so callers never print a partial result.
pub fn compare_files(left: &Path, right: &Path, options: CompareOptions) -> HunterResult<DiffReport> {
    let (left_doc, right_doc) = load_pair(left, right)?;
    let pair = canonical_pair(&left_doc.value, &right_doc.value, options.canonical)?;

    let canonical_match = canonicalize(&pair.values[0]) == canonicalize(&pair.values[1]);
    let line_counts = (left_doc.line_count, right_doc.line_count);
    let lines = compare_lines(&pair.sorted_lines[0], &pair.sorted_lines[1], line_counts);

    let artifacts = if options.write_artifacts {
        Some(persist([left, right], &pair)?)
    } else {
        None
    };

    info!(
        left = %left.display(),
        right = %right.display(),
        canonical_match,
        lines_match = lines.is_match(),
        "comparison finished"
    );

    Ok(DiffReport {
        sizes: (left_doc.byte_size, right_doc.byte_size),
        line_counts,
        canonical_match,
        lines,
        artifacts,
    })
}
