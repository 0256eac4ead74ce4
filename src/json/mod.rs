//! JSON loading, serialization and canonical form.
//!
//! # Architecture
//!
//! - [`types`] - Document tree
//! - [`loader`] - File reading with raw size/line signals
//! - [`jcs`] - Compact and indented deterministic serialization
//! - [`canonical`] - Order-insensitive fixed-point normalization
//!
//! # Example
//!
//! ```
//! use schema_hunter::json::{canonical_form, canonicalize, parse_document};
//! use std::path::Path;
//!
//! let value = parse_document(Path::new("inline.json"), br#"{"b":[3,1],"a":1}"#).unwrap();
//! let canonical = canonical_form(&value).unwrap();
//! assert_eq!(canonicalize(&canonical), r#"{"a":1,"b":[1,3]}"#);
//! ```

pub mod canonical;
pub mod jcs;
pub mod loader;
pub mod types;

pub use canonical::{canonical_form, canonicalize_with, sorted_deep, CanonicalOptions};
pub use jcs::{canonicalize, to_pretty};
pub use loader::{load_document, load_pair, parse_document, LoadedDocument};
pub use types::JsonValue;
