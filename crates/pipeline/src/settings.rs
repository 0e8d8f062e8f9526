//! Pipeline Configuration

use crate::PipelineError;
use categorizer::CategoryRules;
use normalizer::NormalizerConfig;
use profiler::ProfileRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix; nested keys are separated by `__`
pub const ENV_PREFIX: &str = "MOVIE_CLEAN";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// JSON snapshot of raw records
    pub input_path: Option<PathBuf>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub normalizer: NormalizerConfig,
    pub categories: CategoryRules,
    pub profile: ProfileRequest,
    /// Analysis view rows logged after a run
    pub view_preview: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            normalizer: NormalizerConfig::default(),
            categories: CategoryRules::default(),
            profile: ProfileRequest::default(),
            view_preview: 5,
        }
    }
}

impl PipelineConfig {
    /// Layer defaults, an optional config file and `MOVIE_CLEAN__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// `load` with a custom environment prefix
    pub fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self, PipelineError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
