//! Per-file declaration scanning.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::patterns::DeclarationMatcher;
use crate::error::{HunterError, HunterResult};

/// What to do when a file declares annotations but has no package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespacePolicy {
    /// Abort the scan with [`HunterError::MissingNamespace`].
    #[default]
    Strict,
    /// Record the file's declarations under an empty namespace.
    AllowEmpty,
}

/// Declarations found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// Source file the declarations came from.
    pub path: PathBuf,
    /// The file's namespace (empty only under [`NamespacePolicy::AllowEmpty`]).
    pub namespace: String,
    /// Declared names in file order.
    pub declarations: Vec<String>,
}

/// Applies a [`DeclarationMatcher`] to source text.
#[derive(Debug, Clone)]
pub struct DeclarationScanner<M> {
    matcher: M,
    policy: NamespacePolicy,
}

impl<M: DeclarationMatcher> DeclarationScanner<M> {
    /// Create a scanner.
    pub fn new(matcher: M, policy: NamespacePolicy) -> Self {
        Self { matcher, policy }
    }

    /// Scan already-decoded text. `None` means the probe found nothing.
    pub fn scan_text(&self, path: &Path, text: &str) -> HunterResult<Option<FileMatch>> {
        if !self.matcher.probe(text) {
            return Ok(None);
        }
        info!("--Match in {}", path.display());

        let namespace = match (self.matcher.extract_namespace(text), self.policy) {
            (Some(ns), _) => ns,
            (None, NamespacePolicy::AllowEmpty) => String::new(),
            (None, NamespacePolicy::Strict) => {
                return Err(HunterError::MissingNamespace {
                    path: path.to_path_buf(),
                })
            }
        };
        info!("----schema: {}", namespace);

        let declarations = self.matcher.extract_names(text);
        for key in &declarations {
            info!("----key: {}", key);
        }

        Ok(Some(FileMatch {
            path: path.to_path_buf(),
            namespace,
            declarations,
        }))
    }

    /// Read, decode and scan one file. A leading byte order mark is dropped.
    pub fn scan_file(&self, path: &Path) -> HunterResult<Option<FileMatch>> {
        let bytes = fs::read(path).map_err(|e| HunterError::io(path, e))?;
        let text = String::from_utf8(bytes).map_err(|_| HunterError::Decode {
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "scanning");
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        self.scan_text(path, text)
    }
}
