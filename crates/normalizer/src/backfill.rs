//! Exact-Match Backfill

use crate::coerce::assign_value;
use crate::NormalizeError;
use records::{Field, NormalizedRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A known value for a field that is missing on one specific title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Cleaned title, matched exactly
    pub title: String,
    pub field: Field,
    pub value: f64,
}

impl Correction {
    pub fn new(title: &str, field: Field, value: f64) -> Self {
        Self {
            title: title.to_string(),
            field,
            value,
        }
    }
}

/// Closed list of corrections.
///
/// Only rows whose title matches an entry exactly and whose field is
/// absent are touched. Nothing is inferred for any other row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackfillTable {
    pub corrections: Vec<Correction>,
}

impl Default for BackfillTable {
    fn default() -> Self {
        Self {
            corrections: vec![Correction::new("The Dark Knight Rises", Field::Duration, 165.0)],
        }
    }
}

impl BackfillTable {
    pub fn new(corrections: Vec<Correction>) -> Self {
        Self { corrections }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Check every entry targets a numeric field with a value that fits it
    pub fn validate(&self) -> Result<(), NormalizeError> {
        for correction in &self.corrections {
            let invalid = |reason| NormalizeError::InvalidCorrection {
                title: correction.title.clone(),
                field: correction.field,
                reason,
            };
            if correction.title.is_empty() {
                return Err(invalid("empty title"));
            }
            if !correction.field.is_numeric() {
                return Err(invalid("field is not numeric"));
            }
            let mut probe = NormalizedRecord::default();
            if !assign_value(&mut probe, correction.field, correction.value) {
                return Err(invalid("value does not fit the field type"));
            }
        }
        Ok(())
    }

    /// Apply matching corrections to one record, returning how many were applied
    pub fn apply(&self, record: &mut NormalizedRecord) -> usize {
        let mut applied = 0;
        for correction in &self.corrections {
            if record.title.as_deref() != Some(correction.title.as_str()) {
                continue;
            }
            if record.numeric(correction.field).is_some() {
                continue;
            }
            if assign_value(record, correction.field, correction.value) {
                debug!(
                    title = %correction.title,
                    field = %correction.field,
                    value = correction.value,
                    "Backfilled missing value"
                );
                applied += 1;
            }
        }
        applied
    }
}
