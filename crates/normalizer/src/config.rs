//! Normalizer Configuration

use crate::backfill::BackfillTable;
use records::Field;
use serde::{Deserialize, Serialize};

/// How absent identity values compare during deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsencePolicy {
    /// Absent equals absent, like SQL grouping
    #[default]
    MatchAbsent,
    /// A record with any absent identity value is never a duplicate
    NeverMatch,
}

/// One-off fix for budgets entered at the wrong scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeRule {
    /// Budgets strictly above this are considered mis-scaled
    pub threshold: i64,
    /// Divisor applied to mis-scaled budgets
    pub divisor: i64,
}

impl Default for MagnitudeRule {
    fn default() -> Self {
        Self {
            threshold: 1_000_000_000,
            divisor: 10,
        }
    }
}

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Identity comparison for absent values
    pub absence_policy: AbsencePolicy,
    /// Substrings removed from titles, applied in order
    pub title_artifacts: Vec<String>,
    /// Characters removed from numeric-as-text fields before parsing
    pub quote_chars: Vec<char>,
    /// Fields that get quote stripping
    pub quoted_fields: Vec<Field>,
    /// Budget scale correction, `None` disables it
    pub magnitude: Option<MagnitudeRule>,
    /// Closed list of exact-title corrections
    pub backfill: BackfillTable,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            absence_policy: AbsencePolicy::MatchAbsent,
            title_artifacts: vec!["?".to_string(), "??".to_string()],
            quote_chars: vec!['"'],
            quoted_fields: Field::NUMERIC.to_vec(),
            magnitude: Some(MagnitudeRule::default()),
            backfill: BackfillTable::default(),
        }
    }
}
