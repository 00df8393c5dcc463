//! Error types for scout.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error(
        "no data found in {0} (expected combined.json or agents.json; run the collectors first)"
    )]
    MissingData(PathBuf),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ScoutError {
    /// Stable machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Json { .. } | Self::Serialization(_) => "serialization_error",
            Self::Config(_) | Self::MissingConfig(_) => "config_error",
            Self::MissingData(_) => "missing_data",
            Self::ValidationFailed(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
