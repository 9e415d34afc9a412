//! Alert hook trait and the built-in strategies.

use super::completion::Done;
use crate::error::PublishError;
use crate::filter::FutureSet;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Hook invoked with the deferred future items once a filter pass completes.
///
/// The hook owns `done` and must eventually call one of its methods; it may do
/// so synchronously or hand it to other work. `H` is the host pipeline handle,
/// passed through untouched.
pub trait Alert<H: ?Sized>: Send + Sync {
    fn alert(&self, deferred: FutureSet, host: &H, done: Done);

    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<H: ?Sized, F> Alert<H> for F
where
    F: Fn(FutureSet, &H, Done) + Send + Sync,
{
    fn alert(&self, deferred: FutureSet, host: &H, done: Done) {
        self(deferred, host, done)
    }
}

/// Logs every deferred item and the next release time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlert;

impl<H: ?Sized> Alert<H> for LogAlert {
    fn alert(&self, deferred: FutureSet, _host: &H, done: Done) {
        match deferred.next_release() {
            Some(next) => info!(
                count = deferred.len(),
                next_release = %next.to_rfc3339(),
                "Future-dated items deferred"
            ),
            None => debug!("No future-dated items deferred"),
        }
        for (id, at) in deferred.schedule() {
            info!(item = %id, publish_at = %at.to_rfc3339(), "Deferred item");
        }
        done.finish();
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Writes the deferred items as a JSON report, e.g. for a cron job that
/// schedules the next rebuild.
#[derive(Debug, Clone)]
pub struct ReportAlert {
    path: PathBuf,
}

/// On-disk shape of a [`ReportAlert`] report.
#[derive(Debug, Serialize)]
struct DeferredReport<'a> {
    generated_at: String,
    next_release: Option<String>,
    count: usize,
    items: &'a FutureSet,
}

impl ReportAlert {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_report(&self, deferred: &FutureSet) -> Result<(), PublishError> {
        let report = DeferredReport {
            generated_at: Utc::now().to_rfc3339(),
            next_release: deferred.next_release().map(|at| at.to_rfc3339()),
            count: deferred.len(),
            items: deferred,
        };
        let json = serde_json::to_string_pretty(&report)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PublishError::io(parent, e))?;
            }
        }
        std::fs::write(&self.path, json).map_err(|e| PublishError::io(&self.path, e))
    }
}

impl<H: ?Sized> Alert<H> for ReportAlert {
    fn alert(&self, deferred: FutureSet, _host: &H, done: Done) {
        match self.write_report(&deferred) {
            Ok(()) => {
                info!(path = ?self.path, count = deferred.len(), "Wrote deferred items report");
                done.finish();
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Deferred items report failed");
                done.fail("report", e.to_string());
            }
        }
    }

    fn name(&self) -> &str {
        "report"
    }
}
