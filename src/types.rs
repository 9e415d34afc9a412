//! Core types shared across the publish gate.

use crate::item::ItemMetadata;
use std::collections::BTreeMap;

/// ItemId: identifier of a content item, typically a `/`-separated relative path
pub type ItemId = String;

/// ItemCollection: every content item known to the host pipeline, keyed by id
pub type ItemCollection = BTreeMap<ItemId, ItemMetadata>;
