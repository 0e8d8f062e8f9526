//! Category Derivation
//!
//! Maps normalized numeric values to fixed-vocabulary labels using ordered,
//! data-driven threshold bands. Absent values map to a dedicated label so
//! category columns are never empty.

mod bands;
mod categorizer;
mod rules;

pub use bands::{Band, BandTable, Bound};
pub use categorizer::Categorizer;
pub use rules::CategoryRules;

use thiserror::Error;

/// Errors in band table definitions
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    /// A label is empty
    #[error("{table}: empty label at band {position}")]
    EmptyLabel { table: &'static str, position: usize },

    /// Bound is NaN or infinite
    #[error("{table}: bound {value} at band {position} is not finite")]
    InvalidBound {
        table: &'static str,
        position: usize,
        value: f64,
    },

    /// Bound would make the band unreachable
    #[error("{table}: bound {value} at band {position} does not exceed the previous bound")]
    UnorderedBound {
        table: &'static str,
        position: usize,
        value: f64,
    },
}
