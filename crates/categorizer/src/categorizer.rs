//! Categorizer Implementation

use crate::rules::CategoryRules;
use crate::CategoryError;
use records::{Categories, CleanRecord, Field, NormalizedRecord};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Attaches category labels to normalized records.
///
/// Stateless apart from its rules: labels depend only on the record's
/// numeric values, so running it again over the same rows changes nothing.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: CategoryRules,
}

impl Categorizer {
    /// Create a categorizer after validating the rule set
    pub fn new(rules: CategoryRules) -> Result<Self, CategoryError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Compute the labels for one record
    pub fn categories(&self, record: &NormalizedRecord) -> Categories {
        Categories {
            budget_category: self.rules.budget.classify(record.numeric(Field::Budget)).to_string(),
            gross_category: self.rules.gross.classify(record.numeric(Field::Gross)).to_string(),
            duration_category: self
                .rules
                .duration
                .classify(record.numeric(Field::Duration))
                .to_string(),
            rating_category: self.rules.rating.classify(record.numeric(Field::Rating)).to_string(),
        }
    }

    /// Attach labels to one record
    pub fn categorize(&self, record: NormalizedRecord) -> CleanRecord {
        let categories = self.categories(&record);
        CleanRecord { record, categories }
    }

    /// Attach labels to a whole batch
    pub fn categorize_all(&self, records: Vec<NormalizedRecord>) -> Vec<CleanRecord> {
        let clean: Vec<CleanRecord> = records.into_iter().map(|r| self.categorize(r)).collect();
        info!("Categorized {} records", clean.len());
        log_label_counts(&clean);
        clean
    }

    /// Recompute labels in place from the current numeric values
    pub fn recategorize(&self, records: &mut [CleanRecord]) {
        for clean in records.iter_mut() {
            clean.categories = self.categories(&clean.record);
        }
        debug!("Recategorized {} records", records.len());
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self {
            rules: CategoryRules::default(),
        }
    }
}

fn log_label_counts(records: &[CleanRecord]) {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for clean in records {
        let c = &clean.categories;
        for key in [
            ("budget", c.budget_category.as_str()),
            ("gross", c.gross_category.as_str()),
            ("duration", c.duration_category.as_str()),
            ("rating", c.rating_category.as_str()),
        ] {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    for ((field, label), count) in counts {
        debug!(field, label, count, "category distribution");
    }
}
