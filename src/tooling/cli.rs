//! CLI Tooling
//!
//! Command-line interface for publish gate operations. Every command is
//! read-only with respect to the content directory.

use crate::alert::{Alert, AlertRegistry};
use crate::collection::CollectionLoader;
use crate::config::{ConfigLoader, PublishConfig};
use crate::error::PublishError;
use crate::filter::{Disposition, FilterOptions, FilterReport, PublishFilter};
use crate::types::{ItemCollection, ItemId};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Publish Gate CLI - draft, private, and future-dated content filtering
#[derive(Parser)]
#[command(name = "publish-gate")]
#[command(about = "Filter draft, private, and future-dated content items")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Filter the content directory and report what would be published
    Filter {
        /// Keep draft items
        #[arg(long)]
        draft: bool,
        /// Keep private items
        #[arg(long)]
        private: bool,
        /// Keep future-dated items
        #[arg(long)]
        future: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show when the earliest deferred item becomes publishable
    NextRelease {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context: workspace, loaded configuration, and alert strategies.
///
/// Alert hooks receive the workspace root as their host handle.
pub struct CliContext {
    workspace_root: PathBuf,
    config: PublishConfig,
    alerts: AlertRegistry<Path>,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PublishError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: PublishConfig) -> Self {
        Self {
            workspace_root,
            config,
            alerts: AlertRegistry::new(),
        }
    }

    /// Register a named alert strategy, selectable with `kind = "named"`.
    pub fn register_alert<A>(&mut self, name: impl Into<String>, alert: A)
    where
        A: Alert<Path> + 'static,
    {
        self.alerts.register(name, alert);
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, PublishError> {
        match command {
            Commands::Filter {
                draft,
                private,
                future,
                format,
            } => {
                validate_format(format)?;
                let options = FilterOptions {
                    draft: self.config.draft || *draft,
                    private: self.config.private || *private,
                    future: self.config.future || *future,
                };
                self.filter(options, format)
            }
            Commands::NextRelease { format } => {
                validate_format(format)?;
                self.next_release(format)
            }
        }
    }

    fn load_items(&self) -> Result<ItemCollection, PublishError> {
        CollectionLoader::new(self.config.source_dir(&self.workspace_root)).load()
    }

    fn filter(&self, options: FilterOptions, format: &str) -> Result<String, PublishError> {
        let mut items = self.load_items()?;
        let total = items.len();

        let mut filter = PublishFilter::<Path>::new(options);
        if let Some(spec) = self.config.alert_spec(&self.workspace_root) {
            filter = filter.with_shared_alert(self.alerts.resolve(&spec)?);
        }

        let report = filter.apply(&mut items, Utc::now());
        filter
            .notify(report.deferred.clone(), &self.workspace_root)
            .wait_blocking()?;
        info!(total, removed = report.removed(), "Filter command completed");

        format_filter_result(total, &items, &report, format)
    }

    fn next_release(&self, format: &str) -> Result<String, PublishError> {
        let items = self.load_items()?;
        let filter = PublishFilter::<Path>::new(self.config.filter_options());
        let deferred: Vec<DateTime<Utc>> = filter
            .classify(&items, Utc::now())
            .into_iter()
            .filter_map(|(_, disposition)| match disposition {
                Disposition::Defer(at) => Some(at),
                _ => None,
            })
            .collect();
        let next = deferred.iter().min().copied();

        if format == "json" {
            let value = json!({
                "next_release": next.map(|at| at.to_rfc3339()),
                "deferred": deferred.len(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }
        Ok(match next {
            Some(at) => at.to_rfc3339(),
            None => "none".to_string(),
        })
    }
}

fn validate_format(format: &str) -> Result<(), PublishError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(PublishError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn format_filter_result(
    total: usize,
    items: &ItemCollection,
    report: &FilterReport,
    format: &str,
) -> Result<String, PublishError> {
    let retained: Vec<&ItemId> = items.keys().collect();
    let schedule = report.deferred.schedule();

    if format == "json" {
        let deferred: Vec<serde_json::Value> = schedule
            .iter()
            .map(|(id, at)| json!({"id": id, "publish_at": at.to_rfc3339()}))
            .collect();
        let value = json!({
            "total": total,
            "retained": retained,
            "removed": {
                "draft": report.drafts,
                "private": report.private,
            },
            "deferred": deferred,
            "next_release": report.deferred.next_release().map(|at| at.to_rfc3339()),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Item", "Status", "Publish At"]);
    for id in &retained {
        table.add_row(vec![id.as_str(), "published", "-"]);
    }
    for id in &report.drafts {
        table.add_row(vec![id.as_str(), "draft", "-"]);
    }
    for id in &report.private {
        table.add_row(vec![id.as_str(), "private", "-"]);
    }
    for (id, at) in &schedule {
        let at = at.to_rfc3339();
        table.add_row(vec![*id, "deferred", at.as_str()]);
    }

    Ok(format!(
        "{}\n{} of {} items published, {} removed, {} deferred",
        table,
        report.retained,
        total,
        report.drafts.len() + report.private.len(),
        report.deferred.len()
    ))
}
