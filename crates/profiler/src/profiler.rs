//! Profiler Implementation

use crate::statistics::NumericRange;
use records::{Field, FieldSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Which diagnostics to gather in a full profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    /// Fields checked for absent or blank values
    pub missing_fields: Vec<Field>,
    /// Fields summarised with min/max/mean
    pub numeric_fields: Vec<Field>,
    /// Characters marking a malformed title
    pub title_markers: Vec<char>,
}

impl Default for ProfileRequest {
    fn default() -> Self {
        Self {
            missing_fields: vec![
                Field::Title,
                Field::Duration,
                Field::DirectorPopularity,
                Field::Gross,
                Field::Budget,
                Field::ReleaseYear,
                Field::Rating,
            ],
            numeric_fields: vec![
                Field::Duration,
                Field::Gross,
                Field::Budget,
                Field::ReleaseYear,
                Field::Rating,
            ],
            title_markers: vec!['?', '"'],
        }
    }
}

/// Bundled diagnostics for one record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub record_count: usize,
    pub missing: BTreeMap<Field, usize>,
    pub ranges: BTreeMap<Field, Option<NumericRange>>,
    pub malformed_titles: Vec<String>,
}

/// Read-only diagnostics over any record type exposing its fields as text
pub struct Profiler<'a, R> {
    records: &'a [R],
}

impl<'a, R: FieldSource> Profiler<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        Self { records }
    }

    /// Total record count
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Records per field whose value is absent or blank after trimming
    pub fn missing_counts(&self, fields: &[Field]) -> BTreeMap<Field, usize> {
        fields
            .iter()
            .map(|&field| {
                let missing = self
                    .records
                    .iter()
                    .filter(|record| {
                        record
                            .text(field)
                            .map_or(true, |text| text.trim().is_empty())
                    })
                    .count();
                (field, missing)
            })
            .collect()
    }

    /// Min, max and mean over values that parse as numbers; others are skipped
    pub fn numeric_range(&self, field: Field) -> Option<NumericRange> {
        NumericRange::compute(self.records.iter().filter_map(|record| {
            record
                .text(field)
                .and_then(|text| text.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        }))
    }

    /// Titles containing any of the marker characters
    pub fn find_malformed_titles(&self, markers: &[char]) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|record| record.title())
            .filter(|title| title.contains(markers))
            .map(|title| title.into_owned())
            .collect()
    }

    /// Run every diagnostic in the request
    pub fn profile(&self, request: &ProfileRequest) -> ProfileReport {
        let report = ProfileReport {
            record_count: self.count(),
            missing: self.missing_counts(&request.missing_fields),
            ranges: request
                .numeric_fields
                .iter()
                .map(|&field| (field, self.numeric_range(field)))
                .collect(),
            malformed_titles: self.find_malformed_titles(&request.title_markers),
        };
        debug!(
            records = report.record_count,
            malformed_titles = report.malformed_titles.len(),
            "Profile complete"
        );
        report
    }
}
