//! Deferred future-dated items collected by a filter pass.

use crate::item::{ItemMetadata, PublishState};
use crate::types::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Items removed because their publish date is still ahead, with their
/// original metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FutureSet {
    items: BTreeMap<ItemId, ItemMetadata>,
}

impl FutureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ItemId, metadata: ItemMetadata) -> Option<ItemMetadata> {
        self.items.insert(id, metadata)
    }

    pub fn get(&self, id: &str) -> Option<&ItemMetadata> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &ItemMetadata)> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Publish time of a deferred item.
    pub fn publish_time(&self, id: &str) -> Option<DateTime<Utc>> {
        match self.items.get(id)?.publish_state()? {
            PublishState::At(at) => Some(at),
            _ => None,
        }
    }

    /// Deferred items ordered by publish time, earliest first.
    pub fn schedule(&self) -> Vec<(&str, DateTime<Utc>)> {
        let mut schedule: Vec<(&str, DateTime<Utc>)> = self
            .ids()
            .filter_map(|id| self.publish_time(id).map(|at| (id, at)))
            .collect();
        schedule.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        schedule
    }

    /// Earliest deferred publish time: when the next rebuild is due.
    pub fn next_release(&self) -> Option<DateTime<Utc>> {
        self.ids().filter_map(|id| self.publish_time(id)).min()
    }

    pub fn into_inner(self) -> BTreeMap<ItemId, ItemMetadata> {
        self.items
    }
}

impl IntoIterator for FutureSet {
    type Item = (ItemId, ItemMetadata);
    type IntoIter = std::collections::btree_map::IntoIter<ItemId, ItemMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
