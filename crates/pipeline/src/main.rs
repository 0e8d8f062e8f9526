//! Movie Clean - Main Entry Point
//!
//! Usage: `movie-clean [CONFIG]`

use anyhow::Result;
use pipeline::{init_logging, Pipeline, PipelineConfig, PipelineError};
use std::path::PathBuf;
use storage::{load_snapshot, Repository};
use tracing::info;

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = PipelineConfig::load(config_path.as_deref())?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== Movie Clean v{} ===", env!("CARGO_PKG_VERSION"));

    let input = config.input_path.as_ref().ok_or(PipelineError::MissingInput)?;
    let repo = Repository::with_raw(load_snapshot(input)?);
    let pipeline = Pipeline::new(&config)?;

    let report = pipeline.run_profiled(&repo, &config.profile)?;
    info!(report = %serde_json::to_string(&report)?, "Run complete");

    for row in repo.analysis_view()?.iter().take(config.view_preview) {
        info!(row = %serde_json::to_string(row)?, "Analysis view");
    }

    Ok(())
}
