//! Normalization Pass

use crate::coerce::{assign_parsed, strip_artifacts, strip_chars};
use crate::config::NormalizerConfig;
use crate::error::NormalizeError;
use crate::identity::{rank_duplicates, WorkingRecord};
use records::{Field, NormalizedRecord, Passthrough, RawRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Counters collected during one normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Raw records read
    pub input: usize,
    /// Records dropped as rank > 1 in their identity group
    pub duplicates_dropped: usize,
    /// Records emitted
    pub output: usize,
    /// Present (possibly blank) raw values that ended up absent, per field
    pub degraded_to_absent: BTreeMap<Field, usize>,
    /// Titles changed by artifact stripping
    pub titles_stripped: usize,
    /// Budgets rescaled by the magnitude rule
    pub magnitude_corrections: usize,
    /// Backfill corrections applied
    pub backfills_applied: usize,
}

/// Result of a normalization pass
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub records: Vec<NormalizedRecord>,
    pub stats: NormalizeStats,
}

/// Normalizer for raw movie snapshots
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer after validating its rules
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizeError> {
        if let Some(position) = config.title_artifacts.iter().position(|a| a.is_empty()) {
            return Err(NormalizeError::EmptyArtifact(position));
        }
        if let Some(field) = config.quoted_fields.iter().find(|f| !f.is_numeric()) {
            return Err(NormalizeError::NonNumericQuotedField(*field));
        }
        if let Some(rule) = config.magnitude {
            if rule.threshold <= 0 || rule.divisor <= 1 {
                return Err(NormalizeError::InvalidMagnitude {
                    threshold: rule.threshold,
                    divisor: rule.divisor,
                });
            }
        }
        config.backfill.validate()?;
        for correction in &config.backfill.corrections {
            if strip_artifacts(&correction.title, &config.title_artifacts) != correction.title {
                warn!(
                    title = %correction.title,
                    "Backfill title contains a title artifact and can never match a cleaned title"
                );
            }
        }

        Ok(Self { config })
    }

    /// Run every step over the snapshot.
    ///
    /// `raw` is only read; the pass works on its own copy.
    pub fn normalize(&self, raw: &[RawRecord]) -> NormalizeOutcome {
        let mut stats = NormalizeStats {
            input: raw.len(),
            ..Default::default()
        };

        // Snapshot
        let mut working: Vec<WorkingRecord> = raw
            .iter()
            .enumerate()
            .map(|(index, record)| WorkingRecord::new(index, record.clone()))
            .collect();

        // Identity grouping
        let groups = rank_duplicates(&mut working, self.config.absence_policy);
        working.retain(|record| !record.is_duplicate());
        stats.duplicates_dropped = stats.input - working.len();
        debug!(
            groups,
            dropped = stats.duplicates_dropped,
            "Ranked duplicates"
        );

        // Stripping and coercion
        let mut records: Vec<NormalizedRecord> = working
            .into_iter()
            .map(|record| self.clean_fields(record, &mut stats))
            .collect();

        // Magnitude correction
        if let Some(rule) = self.config.magnitude {
            for record in records.iter_mut() {
                match record.budget {
                    Some(budget) if budget > rule.threshold => {
                        debug!(
                            title = record.title.as_deref().unwrap_or_default(),
                            budget,
                            "Rescaling implausible budget"
                        );
                        record.budget = Some(budget / rule.divisor);
                        stats.magnitude_corrections += 1;
                    }
                    _ => {}
                }
            }
        }

        // Backfill
        stats.backfills_applied = records
            .iter_mut()
            .map(|record| self.config.backfill.apply(record))
            .sum();

        stats.output = records.len();
        info!(
            input = stats.input,
            output = stats.output,
            duplicates = stats.duplicates_dropped,
            magnitude_corrections = stats.magnitude_corrections,
            backfills = stats.backfills_applied,
            "Normalization complete"
        );

        NormalizeOutcome { records, stats }
    }

    /// Strip artifacts and coerce every typed field of one surviving row
    fn clean_fields(&self, working: WorkingRecord, stats: &mut NormalizeStats) -> NormalizedRecord {
        let raw = working.raw;
        let mut record = NormalizedRecord {
            source_index: working.source_index,
            passthrough: Passthrough::from(&raw),
            ..Default::default()
        };

        record.title = raw.title.as_deref().and_then(|title| {
            let stripped = strip_artifacts(title, &self.config.title_artifacts);
            if stripped != title {
                stats.titles_stripped += 1;
            }
            if stripped.trim().is_empty() {
                None
            } else {
                Some(stripped)
            }
        });
        if raw.title.is_some() && record.title.is_none() {
            *stats.degraded_to_absent.entry(Field::Title).or_insert(0) += 1;
        }

        for field in Field::NUMERIC {
            let text = raw.get(field);
            let present = if self.config.quoted_fields.contains(&field) {
                let unquoted = text.map(|t| strip_chars(t, &self.config.quote_chars));
                assign_parsed(&mut record, field, unquoted.as_deref())
            } else {
                assign_parsed(&mut record, field, text)
            };
            if text.is_some() && !present {
                *stats.degraded_to_absent.entry(field).or_insert(0) += 1;
            }
        }

        record
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            config: NormalizerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backfill::{BackfillTable, Correction};
    use crate::config::{AbsencePolicy, MagnitudeRule};

    fn movie(title: &str) -> RawRecord {
        RawRecord::default()
            .with(Field::Title, title)
            .with(Field::ReleaseYear, "2012")
    }

    #[test]
    fn test_raw_input_is_untouched() {
        let raw = vec![
            movie("Up?").with(Field::Budget, " 175000000 "),
            movie("Up?").with(Field::Budget, " 175000000 "),
        ];
        let before = raw.clone();

        let outcome = Normalizer::default().normalize(&raw);
        assert_eq!(raw, before);
        assert_eq!(outcome.records.len(), 1);
    }

    #[test]
    fn test_duplicates_keep_first_in_source_order() {
        let raw = vec![
            movie("Brave").with(Field::CriticReviewCount, "first"),
            movie("Brave").with(Field::CriticReviewCount, "second"),
            movie("Cars"),
        ];
        let outcome = Normalizer::default().normalize(&raw);

        assert_eq!(outcome.stats.duplicates_dropped, 1);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].source_index, 0);
        assert_eq!(
            outcome.records[0].passthrough.critic_review_count.as_deref(),
            Some("first")
        );
        assert_eq!(outcome.records[1].source_index, 2);
    }

    #[test]
    fn test_title_artifacts_removed() {
        let outcome = Normalizer::default().normalize(&[movie("Avatar??"), movie("Spider-Man 3?")]);
        let titles: Vec<_> = outcome.records.iter().map(|r| r.title.as_deref()).collect();

        assert_eq!(titles, vec![Some("Avatar"), Some("Spider-Man 3")]);
        assert_eq!(outcome.stats.titles_stripped, 2);
    }

    #[test]
    fn test_title_made_only_of_artifacts_becomes_absent() {
        let outcome = Normalizer::default().normalize(&[movie("??")]);
        assert_eq!(outcome.records[0].title, None);
        assert_eq!(outcome.stats.degraded_to_absent.get(&Field::Title), Some(&1));
    }

    #[test]
    fn test_quoted_popularity_is_parsed() {
        let raw = movie("Up")
            .with(Field::DirectorPopularity, "\"745\"")
            .with(Field::LeadActorPopularity, " \"11000\" ");
        let outcome = Normalizer::default().normalize(&[raw]);
        let record = &outcome.records[0];

        assert_eq!(record.director_popularity, Some(745));
        assert_eq!(record.lead_actor_popularity, Some(11_000));
    }

    #[test]
    fn test_quoted_numbers_recovered_in_every_numeric_field() {
        let raw = movie("Up")
            .with(Field::Gross, "\"293004164\"")
            .with(Field::Budget, "\"175000000\"")
            .with(Field::Duration, "\"96\"")
            .with(Field::Rating, "\"8.3\"");
        let outcome = Normalizer::default().normalize(&[raw]);
        let record = &outcome.records[0];

        assert_eq!(record.gross, Some(293_004_164));
        assert_eq!(record.budget, Some(175_000_000));
        assert_eq!(record.duration, Some(96));
        assert_eq!(record.rating, Some(8.3));
        assert!(outcome.stats.degraded_to_absent.is_empty());
    }

    #[test]
    fn test_quotes_kept_on_unlisted_fields() {
        let config = NormalizerConfig {
            quoted_fields: vec![Field::DirectorPopularity],
            ..Default::default()
        };
        let outcome = Normalizer::new(config)
            .unwrap()
            .normalize(&[movie("Up").with(Field::Gross, "\"100\"")]);
        assert_eq!(outcome.records[0].gross, None);
        assert_eq!(outcome.stats.degraded_to_absent.get(&Field::Gross), Some(&1));
    }

    #[test]
    fn test_blank_and_malformed_become_absent() {
        let raw = movie("Up")
            .with(Field::Duration, "   ")
            .with(Field::Gross, "n/a")
            .with(Field::Budget, "")
            .with(Field::Rating, "eight");
        let outcome = Normalizer::default().normalize(&[raw]);
        let record = &outcome.records[0];

        assert_eq!(record.duration, None);
        assert_eq!(record.gross, None);
        assert_eq!(record.budget, None);
        assert_eq!(record.rating, None);
        assert_eq!(record.release_year, Some(2012));
        assert_eq!(outcome.stats.degraded_to_absent.len(), 4);
    }

    #[test]
    fn test_magnitude_correction() {
        let raw = vec![
            movie("Mis-scaled").with(Field::Budget, "2000000000"),
            movie("Edge").with(Field::Budget, "1000000000"),
        ];
        let outcome = Normalizer::default().normalize(&raw);

        assert_eq!(outcome.records[0].budget, Some(200_000_000));
        assert_eq!(outcome.records[1].budget, Some(1_000_000_000));
        assert_eq!(outcome.stats.magnitude_corrections, 1);
    }

    #[test]
    fn test_magnitude_correction_can_be_disabled() {
        let config = NormalizerConfig {
            magnitude: None,
            ..Default::default()
        };
        let outcome = Normalizer::new(config)
            .unwrap()
            .normalize(&[movie("Big").with(Field::Budget, "2000000000")]);
        assert_eq!(outcome.records[0].budget, Some(2_000_000_000));
    }

    #[test]
    fn test_backfill_only_when_absent() {
        let raw = vec![
            RawRecord::default().with(Field::Title, "The Dark Knight Rises"),
            RawRecord::default()
                .with(Field::Title, "The Dark Knight Rises")
                .with(Field::ReleaseYear, "2012")
                .with(Field::Duration, "164"),
        ];
        let outcome = Normalizer::default().normalize(&raw);

        assert_eq!(outcome.records[0].duration, Some(165));
        assert_eq!(outcome.records[1].duration, Some(164));
        assert_eq!(outcome.stats.backfills_applied, 1);
    }

    #[test]
    fn test_backfill_matches_cleaned_title() {
        let raw = vec![RawRecord::default().with(Field::Title, "The Dark Knight Rises?")];
        let outcome = Normalizer::default().normalize(&raw);
        assert_eq!(outcome.records[0].duration, Some(165));
    }

    #[test]
    fn test_passthrough_carried_unchanged() {
        let raw = movie("Up")
            .with(Field::UserReviewCount, " 1,024 ")
            .with(Field::PosterFaceCount, "");
        let outcome = Normalizer::default().normalize(&[raw]);
        let passthrough = &outcome.records[0].passthrough;

        assert_eq!(passthrough.user_review_count.as_deref(), Some(" 1,024 "));
        assert_eq!(passthrough.poster_face_count.as_deref(), Some(""));
        assert_eq!(passthrough.cast_total_popularity, None);
    }

    #[test]
    fn test_never_match_policy_keeps_sparse_rows() {
        let config = NormalizerConfig {
            absence_policy: AbsencePolicy::NeverMatch,
            ..Default::default()
        };
        let outcome = Normalizer::new(config)
            .unwrap()
            .normalize(&[RawRecord::default(), RawRecord::default()]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.stats.duplicates_dropped, 0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let empty_artifact = NormalizerConfig {
            title_artifacts: vec!["?".to_string(), String::new()],
            ..Default::default()
        };
        assert_eq!(
            Normalizer::new(empty_artifact).unwrap_err(),
            NormalizeError::EmptyArtifact(1)
        );

        let quoted_title = NormalizerConfig {
            quoted_fields: vec![Field::Title],
            ..Default::default()
        };
        assert_eq!(
            Normalizer::new(quoted_title).unwrap_err(),
            NormalizeError::NonNumericQuotedField(Field::Title)
        );

        let bad_magnitude = NormalizerConfig {
            magnitude: Some(MagnitudeRule {
                threshold: 1_000,
                divisor: 1,
            }),
            ..Default::default()
        };
        assert!(Normalizer::new(bad_magnitude).is_err());

        let bad_backfill = NormalizerConfig {
            backfill: BackfillTable::new(vec![Correction::new("", Field::Duration, 90.0)]),
            ..Default::default()
        };
        assert!(Normalizer::new(bad_backfill).is_err());
    }

    #[test]
    fn test_empty_input() {
        let outcome = Normalizer::default().normalize(&[]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.stats, NormalizeStats::default());
    }
}
