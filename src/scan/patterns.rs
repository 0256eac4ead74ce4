//! Textual matching of annotation-type declarations.
//!
//! The scanner only talks to [`DeclarationMatcher`], so the regex strategy
//! here can be replaced by a real parser without touching the glossary.

use std::sync::LazyLock;

use regex::Regex;

/// Finds declarations and the namespace they live in.
pub trait DeclarationMatcher {
    /// True if the text contains at least one declaration.
    fn probe(&self, text: &str) -> bool;

    /// The file's namespace, if it declares one.
    fn extract_namespace(&self, text: &str) -> Option<String>;

    /// Every declared name, in file order, duplicates kept.
    fn extract_names(&self, text: &str) -> Vec<String>;
}

#[allow(clippy::unwrap_used)]
static ANNOTATION_PROBE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@interface\s+[a-zA-Z][a-zA-Z0-9_]*").unwrap());

#[allow(clippy::unwrap_used)]
static ANNOTATION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@interface\s+([a-zA-Z][a-zA-Z0-9_]*)").unwrap());

// Anchored to line start so a `package` word in a trailing comment is ignored.
#[allow(clippy::unwrap_used)]
static PACKAGE_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z_][A-Za-z0-9_]*(?:\s*\.\s*[A-Za-z_][A-Za-z0-9_]*)*)\s*;")
        .unwrap()
});

/// Java `@interface` declarations grouped by `package` statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaAnnotationMatcher;

impl DeclarationMatcher for JavaAnnotationMatcher {
    fn probe(&self, text: &str) -> bool {
        ANNOTATION_PROBE.is_match(text)
    }

    fn extract_namespace(&self, text: &str) -> Option<String> {
        PACKAGE_STATEMENT
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().split_whitespace().collect())
    }

    fn extract_names(&self, text: &str) -> Vec<String> {
        ANNOTATION_NAME
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
