//! Error types for the publish gate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration, loading, alert hooks, and completion.
///
/// The filter pass itself never fails; everything here comes from the
/// collaborators around it.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown alert strategy: {0}")]
    UnknownAlert(String),

    #[error("Alert '{name}' failed: {message}")]
    Alert { name: String, message: String },

    #[error("Completion signal dropped before it was finished")]
    CompletionDropped,

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PublishError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PublishError::Io {
            path: path.into(),
            source,
        }
    }
}
