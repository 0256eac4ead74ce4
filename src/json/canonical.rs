//! Order-insensitive canonical form.
//!
//! Objects are already key-sorted by construction. Arrays are reordered by
//! the compact serialization of their (recursively canonicalized) elements,
//! so two documents that differ only in key order or list order end up with
//! identical trees.
//!
//! The transform is applied until two consecutive passes agree. A single
//! bottom-up pass already reaches the fixed point for trees built here, but
//! the loop keeps the result honest if the element ordering ever changes:
//! hitting the pass cap is reported as [`HunterError::NonConvergent`] rather
//! than returning a possibly unstable tree.

use tracing::debug;

use super::jcs;
use super::types::JsonValue;
use crate::error::{HunterError, HunterResult};

/// Default cap on canonicalization passes.
pub const DEFAULT_MAX_PASSES: usize = 100;

/// Tuning for [`canonicalize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalOptions {
    /// Maximum number of full-tree passes before giving up.
    pub max_passes: usize,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// One full-tree normalization pass.
pub fn sorted_deep(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => {
            let mut keyed: Vec<(String, JsonValue)> = items
                .iter()
                .map(|item| {
                    let item = sorted_deep(item);
                    (jcs::canonicalize(&item), item)
                })
                .collect();
            keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
            JsonValue::Array(keyed.into_iter().map(|(_, item)| item).collect())
        }
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), sorted_deep(item)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Canonicalize with the default pass cap.
pub fn canonical_form(value: &JsonValue) -> HunterResult<JsonValue> {
    canonicalize_with(value, CanonicalOptions::default())
}

/// Apply [`sorted_deep`] until the tree stops changing.
///
/// Returns the fixed point, or `NonConvergent` if `max_passes` passes were
/// applied without two consecutive results agreeing.
pub fn canonicalize_with(value: &JsonValue, options: CanonicalOptions) -> HunterResult<JsonValue> {
    let mut current = value.clone();
    for pass in 1..=options.max_passes {
        let next = sorted_deep(&current);
        if next == current {
            debug!(passes = pass, "canonical form reached");
            return Ok(next);
        }
        current = next;
    }
    Err(HunterError::NonConvergent {
        passes: options.max_passes,
    })
}
