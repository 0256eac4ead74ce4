//! Annotation glossary builder.
//!
//! Walks a source tree, finds files declaring annotation types and maps each
//! declared name to the package of the file that declared it.
//!
//! # Architecture
//!
//! - [`walk`] - Lazy recursive file enumeration
//! - [`patterns`] - Declaration matching behind [`DeclarationMatcher`]
//! - [`scanner`] - Per-file probe and extraction
//! - [`glossary`] - Last-write-wins merge and statistics
//! - [`artifact`] - Output naming and atomic glossary write

pub mod artifact;
pub mod glossary;
pub mod patterns;
pub mod scanner;
pub mod walk;

use std::path::Path;

use tracing::info;

use crate::error::HunterResult;

pub use artifact::{write_glossary, OutputPaths, PendingLog};
pub use glossary::{Collision, Glossary, GlossaryAccumulator, ScanStats};
pub use patterns::{DeclarationMatcher, JavaAnnotationMatcher};
pub use scanner::{DeclarationScanner, FileMatch, NamespacePolicy};
pub use walk::FileEnumerator;

/// Extension of the source files searched by default.
pub const DEFAULT_EXTENSION: &str = "java";

/// Settings for a glossary scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// File extension to scan, without the dot.
    pub extension: String,
    /// Handling of files with declarations but no package.
    pub namespace_policy: NamespacePolicy,
    /// Skip files and directories whose name starts with `.`.
    pub skip_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            namespace_policy: NamespacePolicy::default(),
            skip_hidden: true,
        }
    }
}

/// Result of a complete scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Files enumerated under the root.
    pub files_found: usize,
    /// The finished glossary.
    pub glossary: Glossary,
    /// Counters gathered while merging.
    pub stats: ScanStats,
}

/// Scan `root` for Java annotation types.
pub fn run(root: &Path, options: &ScanOptions) -> HunterResult<ScanOutcome> {
    run_with(root, options, JavaAnnotationMatcher)
}

/// Scan `root` with a custom matcher.
///
/// The file list is collected up front so the log can report its size
/// before parsing starts. Any error aborts the whole scan.
pub fn run_with<M: DeclarationMatcher>(
    root: &Path,
    options: &ScanOptions,
    matcher: M,
) -> HunterResult<ScanOutcome> {
    info!("Listing files in {} ...", root.display());
    let files = FileEnumerator::new(root, &options.extension, options.skip_hidden)?
        .collect::<HunterResult<Vec<_>>>()?;
    info!("{} files found.", files.len());

    info!("Parsing files in {} ...", root.display());
    let scanner = DeclarationScanner::new(matcher, options.namespace_policy);
    let mut accumulator = GlossaryAccumulator::new();
    for path in &files {
        if let Some(found) = scanner.scan_file(path)? {
            accumulator.merge(&found);
        }
    }

    let (glossary, stats) = accumulator.finish();
    info!("Matched {} files.", stats.files_matched);
    info!(
        "Found {}/{} unique annotations.",
        glossary.len(),
        stats.declarations
    );
    if !stats.collisions.is_empty() {
        info!("{} declarations overwrote an earlier entry.", stats.collisions.len());
    }

    Ok(ScanOutcome {
        files_found: files.len(),
        glossary,
        stats,
    })
}
