//! Item Metadata
//!
//! Open-ended metadata records for content items and the publish state
//! derived from their `publish` field. Every field other than `publish` is
//! carried through untouched for downstream pipeline stages.

pub mod date;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub use date::parse_publish_date;

/// Field name the publish gate reads.
pub const PUBLISH_FIELD: &str = "publish";

/// Metadata record (front matter) for one content item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemMetadata {
    fields: Map<String, Value>,
}

impl ItemMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the common case of a single `publish` field.
    pub fn with_publish(value: impl Into<Value>) -> Self {
        let mut metadata = Self::new();
        metadata.insert(PUBLISH_FIELD, value);
        metadata
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw `publish` value, if present.
    pub fn publish_value(&self) -> Option<&Value> {
        self.fields.get(PUBLISH_FIELD)
    }

    /// Publish state derived from the `publish` field.
    ///
    /// Returns `None` when the field is absent or falsy (`null`, `false`,
    /// `""`, `0`), meaning the item is published unconditionally.
    pub fn publish_state(&self) -> Option<PublishState> {
        self.publish_value().and_then(PublishState::from_value)
    }
}

impl From<Map<String, Value>> for ItemMetadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for ItemMetadata {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Publish state of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishState {
    /// `publish: draft`
    Draft,
    /// `publish: private`
    Private,
    /// A publish date/time
    At(DateTime<Utc>),
    /// Truthy value that is neither a keyword nor a recognizable date
    Unparsed(String),
}

impl PublishState {
    /// Interpret a raw `publish` value. Falsy values yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(PublishState::Unparsed("true".to_string())),
            Value::Number(n) => {
                let millis = n.as_f64()?;
                if millis == 0.0 {
                    return None;
                }
                // Numbers are epoch milliseconds.
                match DateTime::from_timestamp_millis(millis as i64) {
                    Some(at) if millis.is_finite() => Some(PublishState::At(at)),
                    _ => Some(PublishState::Unparsed(n.to_string())),
                }
            }
            Value::String(s) => Self::from_str_value(s),
            other => Some(PublishState::Unparsed(other.to_string())),
        }
    }

    fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "" => None,
            "draft" => Some(PublishState::Draft),
            "private" => Some(PublishState::Private),
            other => Some(match parse_publish_date(other) {
                Some(at) => PublishState::At(at),
                None => PublishState::Unparsed(other.to_string()),
            }),
        }
    }

    /// True when this state is a publish time strictly after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        matches!(self, PublishState::At(at) if *at > now)
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishState::Draft => write!(f, "draft"),
            PublishState::Private => write!(f, "private"),
            PublishState::At(at) => write!(f, "{}", at.to_rfc3339()),
            PublishState::Unparsed(raw) => write!(f, "unparsed({})", raw),
        }
    }
}
