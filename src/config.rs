//! Configuration
//!
//! Layered configuration for the publish gate: built-in defaults, an optional
//! `publish-gate.toml` in the workspace, then `PUBLISH_GATE_*` environment
//! variables.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::alert::AlertSpec;
use crate::filter::FilterOptions;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Workspace configuration file name.
pub const CONFIG_FILE_NAME: &str = "publish-gate.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PUBLISH_GATE";

fn default_source() -> PathBuf {
    PathBuf::from("src")
}

/// Publish gate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Keep draft items
    #[serde(default)]
    pub draft: bool,

    /// Keep private items
    #[serde(default)]
    pub private: bool,

    /// Keep future-dated items
    #[serde(default)]
    pub future: bool,

    /// Alert strategy for deferred items; none completes immediately
    #[serde(default)]
    pub alert: Option<AlertSpec>,

    /// Content directory, relative to the workspace root
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            draft: false,
            private: false,
            future: false,
            alert: None,
            source: default_source(),
            logging: LoggingConfig::default(),
        }
    }
}

impl PublishConfig {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            draft: self.draft,
            private: self.private,
            future: self.future,
        }
    }

    /// Content directory resolved against the workspace root.
    pub fn source_dir(&self, workspace_root: &Path) -> PathBuf {
        if self.source.is_absolute() {
            self.source.clone()
        } else {
            workspace_root.join(&self.source)
        }
    }

    /// Alert spec with relative report paths resolved against the workspace root.
    pub fn alert_spec(&self, workspace_root: &Path) -> Option<AlertSpec> {
        self.alert
            .clone()
            .map(|spec| spec.with_base_dir(workspace_root))
    }
}
