//! schema-hunter - annotation glossary scanning and canonical JSON comparison.
//!
//! Two independent pipelines share this crate:
//!
//! - [`scan`] - walks a Java source tree and maps every `@interface`
//!   declaration to the package of the file declaring it
//! - [`json`] + [`compare`] - load two JSON documents, bring both to an
//!   order-insensitive canonical form and report whether they match
//! - [`error`] - the error taxonomy shared by both pipelines
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go.

// Library code propagates errors instead of panicking.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod compare;
pub mod error;
pub mod json;
pub mod scan;

// Re-export commonly used types
pub use compare::{compare_files, CompareOptions, DiffReport, LineComparison};
pub use error::{HunterError, HunterResult};
pub use json::{canonical_form, JsonValue};
pub use scan::{Glossary, GlossaryAccumulator, ScanOptions};
