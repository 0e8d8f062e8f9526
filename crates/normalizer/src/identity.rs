//! Identity Grouping and Duplicate Ranking

use crate::config::AbsencePolicy;
use records::{Field, RawRecord};
use std::collections::HashMap;

/// One component of the identity tuple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// Value missing from the raw row; equal to other `Absent` parts
    Absent,
    /// Literal raw text, compared byte for byte
    Value(String),
}

impl From<Option<&str>> for KeyPart {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(text) => KeyPart::Value(text.to_string()),
            None => KeyPart::Absent,
        }
    }
}

/// Identity tuple over `Field::IDENTITY`, taken from raw text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey([KeyPart; 7]);

impl IdentityKey {
    pub fn of(raw: &RawRecord) -> Self {
        Self(Field::IDENTITY.map(|field| KeyPart::from(raw.get(field))))
    }

    pub fn parts(&self) -> &[KeyPart; 7] {
        &self.0
    }

    pub fn has_absent(&self) -> bool {
        self.0.iter().any(|part| *part == KeyPart::Absent)
    }
}

/// Workspace copy of a raw row
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRecord {
    /// Position in the raw snapshot
    pub source_index: usize,
    pub raw: RawRecord,
    /// 1-based rank inside the identity group; 0 until ranked
    pub duplicate_rank: usize,
}

impl WorkingRecord {
    pub fn new(source_index: usize, raw: RawRecord) -> Self {
        Self {
            source_index,
            raw,
            duplicate_rank: 0,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate_rank > 1
    }
}

/// Rank every record within its identity group, in slice order.
///
/// Returns the number of distinct groups.
pub fn rank_duplicates(records: &mut [WorkingRecord], policy: AbsencePolicy) -> usize {
    let mut seen: HashMap<IdentityKey, usize> = HashMap::with_capacity(records.len());
    let mut singletons = 0;

    for record in records.iter_mut() {
        let key = IdentityKey::of(&record.raw);
        if policy == AbsencePolicy::NeverMatch && key.has_absent() {
            record.duplicate_rank = 1;
            singletons += 1;
            continue;
        }
        let count = seen.entry(key).or_insert(0);
        *count += 1;
        record.duplicate_rank = *count;
    }

    seen.len() + singletons
}
