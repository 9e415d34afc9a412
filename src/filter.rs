//! Publish Filter
//!
//! Removes draft, private, and future-dated items from a collection unless the
//! options allow them. A pass first classifies every item read-only, then
//! applies the removals, so decisions never depend on iteration order or on
//! removals made earlier in the same pass. Future-dated items are collected
//! into a [`FutureSet`] and handed to the configured alert hook, which signals
//! completion back to the host.

pub mod future_set;

use crate::alert::completion::{self, Completion, Done};
use crate::alert::Alert;
use crate::item::{ItemMetadata, PublishState};
use crate::types::{ItemCollection, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

pub use future_set::FutureSet;

/// Which publish states are allowed through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Keep items marked `publish: draft`
    #[serde(default)]
    pub draft: bool,
    /// Keep items marked `publish: private`
    #[serde(default)]
    pub private: bool,
    /// Keep items whose publish date is in the future
    #[serde(default)]
    pub future: bool,
}

/// Why an item was dropped outright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropReason {
    Draft,
    Private,
}

/// Decision for a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the item in the collection
    Retain,
    /// Remove the item
    Drop(DropReason),
    /// Remove the item and defer it until its publish time
    Defer(DateTime<Utc>),
}

/// Outcome of applying a filter pass to a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Items left in the collection
    pub retained: usize,
    /// Ids removed as drafts
    pub drafts: Vec<ItemId>,
    /// Ids removed as private
    pub private: Vec<ItemId>,
    /// Items removed for being future-dated
    pub deferred: FutureSet,
}

impl FilterReport {
    pub fn removed(&self) -> usize {
        self.drafts.len() + self.private.len() + self.deferred.len()
    }
}

/// Publish-state filter, optionally paired with an alert hook.
///
/// `H` is the host pipeline handle forwarded to the alert hook.
pub struct PublishFilter<H: ?Sized = ()> {
    options: FilterOptions,
    alert: Option<Arc<dyn Alert<H>>>,
}

impl<H: ?Sized> Default for PublishFilter<H> {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}

impl<H: ?Sized> PublishFilter<H> {
    pub fn new(options: FilterOptions) -> Self {
        PublishFilter {
            options,
            alert: None,
        }
    }

    pub fn with_alert<A>(self, alert: A) -> Self
    where
        A: Alert<H> + 'static,
    {
        self.with_shared_alert(Arc::new(alert))
    }

    /// Closure form of [`with_alert`](Self::with_alert); saves annotating the
    /// closure's argument types.
    pub fn with_alert_fn<F>(self, alert: F) -> Self
    where
        F: Fn(FutureSet, &H, Done) + Send + Sync + 'static,
    {
        self.with_alert(alert)
    }

    pub fn with_shared_alert(mut self, alert: Arc<dyn Alert<H>>) -> Self {
        self.alert = Some(alert);
        self
    }

    pub fn options(&self) -> FilterOptions {
        self.options
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    /// Decide what happens to one item, given the time of the pass.
    pub fn disposition(&self, metadata: &ItemMetadata, now: DateTime<Utc>) -> Disposition {
        match metadata.publish_state() {
            None => Disposition::Retain,
            Some(PublishState::Draft) if !self.options.draft => {
                Disposition::Drop(DropReason::Draft)
            }
            Some(PublishState::Private) if !self.options.private => {
                Disposition::Drop(DropReason::Private)
            }
            Some(PublishState::At(at)) if at > now && !self.options.future => {
                Disposition::Defer(at)
            }
            Some(_) => Disposition::Retain,
        }
    }

    /// Classify every item without touching the collection.
    pub fn classify(
        &self,
        items: &ItemCollection,
        now: DateTime<Utc>,
    ) -> Vec<(ItemId, Disposition)> {
        items
            .iter()
            .map(|(id, metadata)| {
                let disposition = self.disposition(metadata, now);
                debug!(item = %id, ?disposition, "Analyzed publish state");
                (id.clone(), disposition)
            })
            .collect()
    }

    /// Remove every item the options do not allow, returning what was removed.
    pub fn apply(&self, items: &mut ItemCollection, now: DateTime<Utc>) -> FilterReport {
        let mut report = FilterReport::default();

        for (id, disposition) in self.classify(items, now) {
            match disposition {
                Disposition::Retain => {}
                Disposition::Drop(reason) => {
                    items.remove(&id);
                    match reason {
                        DropReason::Draft => report.drafts.push(id),
                        DropReason::Private => report.private.push(id),
                    }
                }
                Disposition::Defer(_) => {
                    if let Some(metadata) = items.remove(&id) {
                        report.deferred.insert(id, metadata);
                    }
                }
            }
        }
        report.retained = items.len();

        info!(
            retained = report.retained,
            drafts = report.drafts.len(),
            private = report.private.len(),
            deferred = report.deferred.len(),
            "Publish filter applied"
        );
        report
    }

    /// Hand the deferred items to the alert hook, or complete right away when
    /// no hook is configured.
    pub fn notify(&self, deferred: FutureSet, host: &H) -> Completion {
        let (done, completion) = completion::channel();
        match &self.alert {
            Some(alert) => {
                debug!(alert = alert.name(), count = deferred.len(), "Calling alert hook");
                alert.alert(deferred, host, done);
            }
            None => done.finish(),
        }
        completion
    }

    /// Filter `items` in place against the current time and notify the alert hook.
    pub fn run(&self, items: &mut ItemCollection, host: &H) -> Completion {
        self.run_at(items, host, Utc::now())
    }

    /// [`run`](Self::run) with an explicit clock.
    pub fn run_at(&self, items: &mut ItemCollection, host: &H, now: DateTime<Utc>) -> Completion {
        let report = self.apply(items, now);
        self.notify(report.deferred, host)
    }
}
