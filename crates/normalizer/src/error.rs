//! Normalizer Error Types

use records::Field;
use thiserror::Error;

/// Errors in normalizer configuration.
///
/// Record values never produce errors; only a bad rule set does.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    /// Title artifact pattern is empty
    #[error("Title artifact at position {0} is empty")]
    EmptyArtifact(usize),

    /// Quote stripping configured for a non-numeric field
    #[error("Quote stripping is only supported on numeric fields, got {0}")]
    NonNumericQuotedField(Field),

    /// Magnitude rule would not shrink values
    #[error("Invalid magnitude rule: threshold {threshold}, divisor {divisor}")]
    InvalidMagnitude { threshold: i64, divisor: i64 },

    /// Backfill entry cannot be applied
    #[error("Invalid correction for {title:?} ({field}): {reason}")]
    InvalidCorrection {
        title: String,
        field: Field,
        reason: &'static str,
    },
}
