//! Output naming and persistence of the glossary and run log.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tempfile::NamedTempFile;

use super::glossary::Glossary;
use crate::error::{HunterError, HunterResult};

/// Timestamp prefix of every output file name.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

/// The glossary and log paths for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Glossary JSON.
    pub glossary: PathBuf,
    /// Run log.
    pub log: PathBuf,
}

/// Base name of the scanned root, resolving `.` and trailing separators.
pub fn root_basename(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl OutputPaths {
    /// `<output_dir>/<timestamp>-<root basename>.{json,log}`.
    pub fn new(root: &Path, output_dir: &Path, started: NaiveDateTime) -> Self {
        let base = format!("{}-{}", started.format(TIMESTAMP_FORMAT), root_basename(root));
        Self {
            glossary: output_dir.join(format!("{base}.json")),
            log: output_dir.join(format!("{base}.log")),
        }
    }
}

/// Write the glossary atomically.
///
/// The JSON goes to a temporary file in the destination directory and is
/// renamed into place, so a failed write leaves no glossary behind.
pub fn write_glossary(glossary: &Glossary, path: &Path) -> HunterResult<()> {
    let dir = parent_dir(path);
    let json = glossary.to_json().map_err(|e| HunterError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| HunterError::io(dir, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| HunterError::io(file.path(), e))?;
    file.persist(path)
        .map_err(|e| HunterError::io(path, e.error))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// A run log that only appears at its final path once committed.
///
/// Lines are written to a temporary file beside the destination. Dropping
/// the log without [`PendingLog::commit`] removes it, so an aborted scan
/// leaves no output behind.
#[derive(Debug)]
pub struct PendingLog {
    file: NamedTempFile,
    path: PathBuf,
}

impl PendingLog {
    /// Open a temporary log in the directory of `path`.
    pub fn create(path: &Path) -> HunterResult<Self> {
        let dir = parent_dir(path);
        let file = NamedTempFile::new_in(dir).map_err(|e| HunterError::io(dir, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Final location of the log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A second handle for the log writer.
    pub fn writer(&self) -> HunterResult<File> {
        self.file
            .as_file()
            .try_clone()
            .map_err(|e| HunterError::io(self.file.path(), e))
    }

    /// Move the log to its final path.
    pub fn commit(self) -> HunterResult<()> {
        self.file
            .persist(&self.path)
            .map_err(|e| HunterError::io(&self.path, e.error))?;
        Ok(())
    }
}
