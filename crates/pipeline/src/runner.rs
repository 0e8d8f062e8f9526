//! Pipeline Runner

use crate::{PipelineConfig, PipelineError};
use categorizer::Categorizer;
use chrono::{DateTime, Utc};
use normalizer::{NormalizeStats, Normalizer};
use profiler::{ProfileReport, ProfileRequest, Profiler};
use serde::Serialize;
use storage::Repository;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub raw_records: usize,
    pub clean_records: usize,
    pub normalize: NormalizeStats,
    /// Raw snapshot diagnostics, only filled by `run_profiled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<ProfileReport>,
    /// Clean table diagnostics, only filled by `run_profiled`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<ProfileReport>,
}

/// Normalize-then-categorize batch over a repository
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    categorizer: Categorizer,
}

impl Pipeline {
    /// Build both stages, rejecting invalid rules before any data is touched
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            normalizer: Normalizer::new(config.normalizer.clone())?,
            categorizer: Categorizer::new(config.categories.clone())?,
        })
    }

    /// Rebuild the clean table from the raw snapshot
    ///
    /// The raw snapshot is only read; the clean table is replaced as a whole,
    /// so running twice over the same snapshot publishes the same rows.
    pub fn run(&self, repo: &Repository) -> Result<PipelineReport, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", %run_id);
        let _enter = span.enter();

        let started_at = Utc::now();
        let raw = repo.raw_snapshot()?;
        info!("Pipeline run started over {} raw records", raw.len());

        let outcome = self.normalizer.normalize(&raw);
        let clean = self.categorizer.categorize_all(outcome.records);
        let clean_records = clean.len();
        repo.replace_clean(clean)?;

        let finished_at = Utc::now();
        record_metrics(&outcome.stats);
        info!(
            duplicates = outcome.stats.duplicates_dropped,
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "Pipeline run published {} clean records",
            clean_records
        );

        Ok(PipelineReport {
            run_id,
            started_at,
            finished_at,
            raw_records: raw.len(),
            clean_records,
            normalize: outcome.stats,
            before: None,
            after: None,
        })
    }

    /// `run`, with the profiler applied to the raw snapshot before and the clean table after
    pub fn run_profiled(
        &self,
        repo: &Repository,
        request: &ProfileRequest,
    ) -> Result<PipelineReport, PipelineError> {
        let raw = repo.raw_snapshot()?;
        let before = Profiler::new(&raw).profile(request);

        let mut report = self.run(repo)?;

        let clean = repo.clean_records()?;
        let after = Profiler::new(&clean).profile(request);
        debug!(
            malformed_before = before.malformed_titles.len(),
            malformed_after = after.malformed_titles.len(),
            "Profiles attached to run {}",
            report.run_id
        );

        report.before = Some(before);
        report.after = Some(after);
        Ok(report)
    }

    /// Refresh labels on the published clean table after its values were edited
    pub fn recategorize(&self, repo: &Repository) -> Result<(), PipelineError> {
        repo.update_clean(|rows| self.categorizer.recategorize(rows))?;
        debug!("Clean table recategorized");
        Ok(())
    }
}

fn record_metrics(stats: &NormalizeStats) {
    metrics::counter!("movie_clean_runs_total").increment(1);
    metrics::counter!("movie_clean_records_in_total").increment(stats.input as u64);
    metrics::counter!("movie_clean_records_out_total").increment(stats.output as u64);
    metrics::counter!("movie_clean_duplicates_dropped_total")
        .increment(stats.duplicates_dropped as u64);
    for (field, count) in &stats.degraded_to_absent {
        metrics::counter!("movie_clean_degraded_total", "field" => field.name())
            .increment(*count as u64);
    }
}
