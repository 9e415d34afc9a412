//! Named alert strategies selectable from configuration.

use super::hook::{Alert, LogAlert, ReportAlert};
use crate::error::PublishError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Alert selection as written in configuration.
///
/// ```toml
/// [alert]
/// kind = "report"
/// path = "deferred.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AlertSpec {
    /// Log deferred items through `tracing`.
    Log,
    /// Write a JSON report of deferred items.
    Report { path: PathBuf },
    /// A strategy registered by the host under this name.
    Named { name: String },
}

impl AlertSpec {
    /// Resolve a relative report path against `base`.
    pub fn with_base_dir(self, base: &Path) -> Self {
        match self {
            AlertSpec::Report { path } if path.is_relative() => AlertSpec::Report {
                path: base.join(path),
            },
            other => other,
        }
    }
}

/// Registry of alert strategies keyed by name.
pub struct AlertRegistry<H: ?Sized> {
    strategies: HashMap<String, Arc<dyn Alert<H>>>,
}

impl<H: ?Sized> Default for AlertRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> AlertRegistry<H> {
    /// Registry with the built-in `log` strategy.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("log", LogAlert);
        registry
    }

    pub fn empty() -> Self {
        AlertRegistry {
            strategies: HashMap::new(),
        }
    }

    /// Register (or replace) a strategy.
    pub fn register<A>(&mut self, name: impl Into<String>, alert: A)
    where
        A: Alert<H> + 'static,
    {
        self.strategies.insert(name.into(), Arc::new(alert));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Alert<H>>> {
        self.strategies.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Turn a configured spec into a hook.
    pub fn resolve(&self, spec: &AlertSpec) -> Result<Arc<dyn Alert<H>>, PublishError> {
        match spec {
            AlertSpec::Log => Ok(self
                .get("log")
                .unwrap_or_else(|| Arc::new(LogAlert) as Arc<dyn Alert<H>>)),
            AlertSpec::Report { path } => Ok(Arc::new(ReportAlert::new(path.clone()))),
            AlertSpec::Named { name } => self
                .get(name)
                .ok_or_else(|| PublishError::UnknownAlert(name.clone())),
        }
    }
}
