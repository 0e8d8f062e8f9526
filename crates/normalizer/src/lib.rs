//! Record Normalization
//!
//! Turns the raw movie snapshot into deduplicated, typed records:
//! snapshot, identity ranking, artifact stripping, blank-to-absent
//! coercion, magnitude correction and closed-list backfill.
//!
//! No data value can fail a run. Anything malformed becomes absent.

mod backfill;
mod coerce;
mod config;
mod error;
mod identity;
mod normalizer;

pub use backfill::{BackfillTable, Correction};
pub use coerce::{blank_to_absent, parse_float, parse_integer, strip_artifacts, strip_chars};
pub use config::{AbsencePolicy, MagnitudeRule, NormalizerConfig};
pub use error::NormalizeError;
pub use identity::{rank_duplicates, IdentityKey, KeyPart, WorkingRecord};
pub use normalizer::{NormalizeOutcome, NormalizeStats, Normalizer};
