//! Content store abstraction for the smap sitemap engine.
//!
//! This crate provides a [`ContentStore`] trait for reading the site's content
//! items, taxonomy terms and their registered labels. The sitemap engine only
//! ever reads through this trait, which enables:
//!
//! - **Unit testing** against an in-memory store
//! - **Backend flexibility** (snapshot files, a CMS database, a remote API)
//! - **Clean separation** between sitemap rendering and content queries
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentStore`] trait with `list_items()`, `list_terms()` and label lookups
//! - [`ItemQuery`] / [`TermQuery`] describing filters and ordering
//! - [`MemoryStore`], an in-memory implementation that applies those filters
//!
//! # Example
//!
//! ```
//! use smap_store::{ContentStore, Item, ItemQuery, MemoryStore};
//!
//! let store = MemoryStore::new()
//!     .with_content_type("page", "Pages")
//!     .with_item("page", Item::new(1, "About"));
//!
//! let items = store.list_items("page", &ItemQuery::default()).unwrap();
//! assert_eq!(items[0].title, "About");
//! ```

mod memory;
mod query;
mod store;

pub use memory::MemoryStore;
pub use query::{ItemOrderBy, ItemQuery, SortDirection, TermOrderBy, TermQuery};
pub use store::{ContentStore, Item, ItemId, ItemStatus, StoreError, StoreErrorKind, Term, TermId};
