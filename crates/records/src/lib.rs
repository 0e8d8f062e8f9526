//! Movie Records
//!
//! Shared record types for every pipeline stage:
//! - `RawRecord`: loosely typed snapshot row, never mutated
//! - `NormalizedRecord`: deduplicated, typed row produced by the normalizer
//! - `CleanRecord`: normalized row with category labels attached
//! - `AnalysisRow`: read-only projection published to analysts

mod clean;
mod field;
mod raw;
mod view;

pub use clean::{Categories, CleanRecord, NormalizedRecord, Passthrough};
pub use field::{Field, FieldSource};
pub use raw::RawRecord;
pub use view::AnalysisRow;

use thiserror::Error;

/// Record model errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Field name not present in the catalogue
    #[error("Unknown field: {0}")]
    UnknownField(String),
}
