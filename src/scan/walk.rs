//! Recursive source file enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HunterError, HunterResult};

/// Lazily walks a directory tree, yielding files with one extension.
///
/// Each directory is listed when it is first reached and its entries are
/// visited in name order. Entries whose name starts with `.` are skipped when
/// `skip_hidden` is set.
#[derive(Debug)]
pub struct FileEnumerator {
    extension: String,
    skip_hidden: bool,
    pending_dirs: Vec<PathBuf>,
    pending_files: Vec<PathBuf>,
}

impl FileEnumerator {
    /// Start a walk at `root`.
    ///
    /// Fails with `PathNotFound` if the root does not exist.
    pub fn new(root: &Path, extension: &str, skip_hidden: bool) -> HunterResult<Self> {
        if !root.exists() {
            return Err(HunterError::PathNotFound {
                path: root.to_path_buf(),
            });
        }
        let mut walker = Self {
            extension: extension.trim_start_matches('.').to_string(),
            skip_hidden,
            pending_dirs: Vec::new(),
            pending_files: Vec::new(),
        };
        if root.is_dir() {
            walker.pending_dirs.push(root.to_path_buf());
        } else if walker.wants(root) {
            walker.pending_files.push(root.to_path_buf());
        }
        Ok(walker)
    }

    fn wants(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str())
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'))
    }

    /// List one directory, queueing its subdirectories and matching files.
    fn expand(&mut self, dir: &Path) -> HunterResult<()> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| HunterError::io(dir, e))? {
            let entry = entry.map_err(|e| HunterError::io(dir, e))?;
            entries.push(entry.path());
        }
        entries.sort();

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for path in entries {
            if self.skip_hidden && Self::is_hidden(&path) {
                continue;
            }
            if path.is_dir() {
                dirs.push(path);
            } else if path.is_file() && self.wants(&path) {
                files.push(path);
            }
        }

        // Both queues pop from the back; reverse to keep name order.
        self.pending_files.extend(files.into_iter().rev());
        self.pending_dirs.extend(dirs.into_iter().rev());
        Ok(())
    }
}

impl Iterator for FileEnumerator {
    type Item = HunterResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.pending_files.pop() {
                return Some(Ok(file));
            }
            let dir = self.pending_dirs.pop()?;
            if let Err(e) = self.expand(&dir) {
                return Some(Err(e));
            }
        }
    }
}
