//! Movie Cleaning Pipeline
//!
//! Wires the stages together over a `Repository`: normalize the raw
//! snapshot, categorize the survivors, publish the clean table. Also hosts
//! configuration loading and logging setup for the `movie-clean` binary.

mod runner;
mod settings;

pub use runner::{Pipeline, PipelineReport};
pub use settings::{LogFormat, PipelineConfig};

use categorizer::CategoryError;
use normalizer::NormalizeError;
use storage::StorageError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Normalizer rules rejected: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Category rules rejected: {0}")]
    Category(#[from] CategoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Logging(String),

    #[error("No input snapshot configured")]
    MissingInput,
}

/// Initialize logging
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), PipelineError> {
    let level: Level = level
        .parse()
        .map_err(|_| PipelineError::InvalidLogLevel(level.to_string()))?;

    let result = match format {
        LogFormat::Pretty => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .json()
                .with_max_level(level)
                .with_target(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    result.map_err(|e| PipelineError::Logging(e.to_string()))
}
