//! Error handling for both pipelines.
//!
//! Every failure aborts the run: nothing is retried and no partial output is
//! written. Variants carry the offending path so the top-level report names
//! the file that stopped the run.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type HunterResult<T> = Result<T, HunterError>;

/// All errors surfaced by the scanner and the comparison checker.
#[derive(Debug, Error)]
pub enum HunterError {
    /// A scan root or compared document does not exist.
    #[error("path does not exist: {}", path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A source file is not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
    },

    /// A file declares annotation types but has no package statement.
    #[error("{} declares annotation types but has no package statement", path.display())]
    MissingNamespace {
        /// The offending source file.
        path: PathBuf,
    },

    /// A compared document is not syntactically valid JSON.
    #[error("invalid JSON in {} at line {line}, column {column}: {message}", path.display())]
    Parse {
        /// The document that failed to parse.
        path: PathBuf,
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// Canonicalization did not settle within the pass cap.
    #[error("canonical form did not converge after {passes} passes")]
    NonConvergent {
        /// Number of passes applied before giving up.
        passes: usize,
    },

    /// Any other file-system failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl HunterError {
    /// Wrap an I/O error with the path it occurred on.
    ///
    /// `NotFound` is promoted to [`HunterError::PathNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            HunterError::PathNotFound { path }
        } else {
            HunterError::Io { path, source }
        }
    }

    /// Wrap a JSON syntax error with the document it came from.
    pub fn parse(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        HunterError::Parse {
            path: path.into(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// Short stable name for the error kind, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            HunterError::PathNotFound { .. } => "PathNotFound",
            HunterError::Decode { .. } => "Decode",
            HunterError::MissingNamespace { .. } => "MissingNamespace",
            HunterError::Parse { .. } => "Parse",
            HunterError::NonConvergent { .. } => "NonConvergent",
            HunterError::Io { .. } => "Io",
        }
    }
}
