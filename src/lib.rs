//! Publish Gate: Draft, Private, and Future-Dated Content Filtering
//!
//! Filters a static-site content collection by each item's `publish` front
//! matter field. Drafts, private items, and items dated in the future are
//! removed unless enabled; future-dated items are handed to an alert hook so
//! the host can schedule its next rebuild.
//!
//! ```
//! use publish_gate::filter::{FilterOptions, PublishFilter};
//! use publish_gate::item::ItemMetadata;
//! use publish_gate::types::ItemCollection;
//!
//! let mut items = ItemCollection::new();
//! items.insert("a.md".to_string(), ItemMetadata::with_publish("draft"));
//! items.insert("b.md".to_string(), ItemMetadata::new());
//!
//! let filter: PublishFilter = PublishFilter::new(FilterOptions::default());
//! let mut completion = filter.run(&mut items, &());
//! assert!(matches!(completion.try_result(), Some(Ok(()))));
//! assert_eq!(items.len(), 1);
//! ```

pub mod alert;
pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod item;
pub mod logging;
pub mod tooling;
pub mod types;

pub use error::PublishError;
pub use filter::{FilterOptions, FutureSet, PublishFilter};
