//! Merging per-file results into the declaration glossary.
//!
//! A name declared in several files keeps the namespace of whichever file
//! was merged last. Every overwrite is recorded so the run summary can show
//! how much was lost.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use super::scanner::FileMatch;

/// Mapping from declaration name to namespace.
///
/// Serializes as a flat JSON object. Keys keep the position of their first
/// insertion; values are the last namespace written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Glossary {
    entries: IndexMap<String, String>,
}

/// A name that was declared again after it was already in the glossary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// The re-declared name.
    pub name: String,
    /// Namespace that was overwritten.
    pub previous: String,
    /// Namespace that won.
    pub current: String,
    /// File whose declaration won.
    pub path: PathBuf,
}

/// Counters for one scan. Derived from the merge, never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files that matched the declaration probe.
    pub files_matched: usize,
    /// Declarations seen, duplicates included.
    pub declarations: usize,
    /// Overwrites of an existing glossary entry.
    pub collisions: Vec<Collision>,
}

impl Glossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of unique names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no declarations have been merged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Indented JSON object, 4 spaces per level.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Builds a [`Glossary`] from scanner output.
#[derive(Debug, Default)]
pub struct GlossaryAccumulator {
    glossary: Glossary,
    stats: ScanStats,
}

impl GlossaryAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's declarations. Later merges win.
    pub fn merge(&mut self, found: &FileMatch) {
        self.stats.files_matched += 1;
        for name in &found.declarations {
            self.stats.declarations += 1;
            let previous = self
                .glossary
                .entries
                .insert(name.clone(), found.namespace.clone());
            if let Some(previous) = previous {
                if previous != found.namespace {
                    warn!(
                        name = %name,
                        previous = %previous,
                        current = %found.namespace,
                        path = %found.path.display(),
                        "annotation redeclared in another namespace"
                    );
                }
                self.stats.collisions.push(Collision {
                    name: name.clone(),
                    previous,
                    current: found.namespace.clone(),
                    path: found.path.clone(),
                });
            }
        }
    }

    /// Current glossary contents.
    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Finish accumulation.
    pub fn finish(self) -> (Glossary, ScanStats) {
        (self.glossary, self.stats)
    }
}
