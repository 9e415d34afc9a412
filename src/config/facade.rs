//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::PublishConfig;
use crate::error::PublishError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the workspace file and environment.
    pub fn load(workspace_root: &Path) -> Result<PublishConfig, PublishError> {
        Ok(MergeService::load(workspace_root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<PublishConfig, PublishError> {
        if !path.is_file() {
            return Err(PublishError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            ));
        }
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> PublishConfig {
        PublishConfig::default()
    }
}
