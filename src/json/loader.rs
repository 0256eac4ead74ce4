//! Document loading for the comparison pipeline.
//!
//! Raw size and line count are taken from the bytes before parsing. They
//! are informational only: two documents formatted differently disagree on
//! both and can still be equivalent.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::JsonValue;
use crate::error::{HunterError, HunterResult};

/// A parsed document plus the raw-text signals gathered before parsing.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Path the document was read from.
    pub path: PathBuf,
    /// Size of the file in bytes.
    pub byte_size: u64,
    /// Number of text lines, counting a final unterminated line.
    pub line_count: usize,
    /// Parsed tree.
    pub value: JsonValue,
}

/// Count lines the way a line-by-line reader would.
pub fn count_lines(bytes: &[u8]) -> usize {
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    match bytes.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Parse JSON text from memory, attributing errors to `path`.
pub fn parse_document(path: &Path, bytes: &[u8]) -> HunterResult<JsonValue> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| HunterError::parse(path, &e))?;
    Ok(JsonValue::from(value))
}

/// Read and parse one document.
pub fn load_document(path: &Path) -> HunterResult<LoadedDocument> {
    let bytes = fs::read(path).map_err(|e| HunterError::io(path, e))?;
    let byte_size = bytes.len() as u64;
    let line_count = count_lines(&bytes);
    let value = parse_document(path, &bytes)?;
    debug!(
        path = %path.display(),
        byte_size,
        line_count,
        root = value.type_name(),
        depth = value.depth(),
        "loaded document"
    );
    Ok(LoadedDocument {
        path: path.to_path_buf(),
        byte_size,
        line_count,
        value,
    })
}

/// Load both sides of a comparison. Either failure aborts the pair.
pub fn load_pair(left: &Path, right: &Path) -> HunterResult<(LoadedDocument, LoadedDocument)> {
    Ok((load_document(left)?, load_document(right)?))
}
