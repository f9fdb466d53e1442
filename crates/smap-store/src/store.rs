//! Content store trait, record types and error types.
//!
//! Provides the core [`ContentStore`] trait for reading content items and
//! taxonomy terms, along with [`StoreError`] for unified error handling
//! across backends.
//!
//! # Parent Relation
//!
//! Both [`Item`] and [`Term`] carry an optional `parent` identifier. The
//! relation is owned by the store; consumers group by it but never compute
//! or repair it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{ItemQuery, TermQuery};

/// Content item identifier.
pub type ItemId = u64;

/// Taxonomy term identifier.
pub type TermId = u64;

/// Publication status of a content item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Publicly visible.
    #[default]
    Publish,
    /// Not yet published.
    Draft,
    /// Awaiting review.
    Pending,
    /// Visible to privileged users only.
    Private,
    /// Scheduled for later publication.
    Future,
}

/// A content item (page, post, custom content type entry).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the store.
    pub id: ItemId,
    /// Display title. May be empty.
    #[serde(default)]
    pub title: String,
    /// Permalink.
    #[serde(default)]
    pub url: String,
    /// Parent item, `None` for top-level items.
    #[serde(default)]
    pub parent: Option<ItemId>,
    /// Publication date.
    #[serde(default)]
    pub date: DateTime<Utc>,
    /// Manual ordering position.
    #[serde(default)]
    pub menu_order: i64,
    /// Publication status.
    #[serde(default)]
    pub status: ItemStatus,
    /// True if the item requires a password to view.
    #[serde(default)]
    pub password_protected: bool,
}

impl Item {
    /// Create a published top-level item with a default permalink.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: format!("/?p={id}"),
            parent: None,
            date: DateTime::<Utc>::default(),
            menu_order: 0,
            status: ItemStatus::Publish,
            password_protected: false,
        }
    }

    /// Set the permalink.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the parent item.
    #[must_use]
    pub fn with_parent(mut self, parent: ItemId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the publication date.
    #[must_use]
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Set the menu order.
    #[must_use]
    pub fn with_menu_order(mut self, menu_order: i64) -> Self {
        self.menu_order = menu_order;
        self
    }

    /// Set the publication status.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the item as password protected.
    #[must_use]
    pub fn password_protected(mut self) -> Self {
        self.password_protected = true;
        self
    }
}

/// A taxonomy term (category, tag, custom classification value).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Unique identifier within the taxonomy.
    pub id: TermId,
    /// Display name.
    pub name: String,
    /// Archive link.
    #[serde(default)]
    pub url: String,
    /// Parent term, `None` for top-level terms.
    #[serde(default)]
    pub parent: Option<TermId>,
    /// Number of items directly classified with this term.
    #[serde(default)]
    pub count: u64,
}

impl Term {
    /// Create an empty top-level term with a default archive link.
    #[must_use]
    pub fn new(id: TermId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: format!("/?cat={id}"),
            parent: None,
            count: 0,
        }
    }

    /// Set the archive link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the parent term.
    #[must_use]
    pub fn with_parent(mut self, parent: TermId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the classified item count.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Source data could not be parsed.
    InvalidFormat,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Snapshot", "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                StoreErrorKind::Unavailable
            }
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::InvalidFormat => "Invalid format",
            StoreErrorKind::Unavailable => "Unavailable",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to the site's content.
///
/// Implementations own filtering and ordering: the returned sequences are
/// already in display order, and the engine preserves that order within each
/// hierarchy level.
///
/// Listing an unregistered content type or taxonomy is not an error; it
/// returns an empty sequence. Use the label lookups to tell the two apart.
pub trait ContentStore: Send + Sync {
    /// List published items of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn list_items(&self, content_type: &str, query: &ItemQuery) -> Result<Vec<Item>, StoreError>;

    /// List terms of a taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn list_terms(&self, taxonomy: &str, query: &TermQuery) -> Result<Vec<Term>, StoreError>;

    /// Registered plural label of a content type, `None` if unregistered.
    fn type_label(&self, content_type: &str) -> Option<String>;

    /// Registered label of a taxonomy, `None` if unregistered.
    fn taxonomy_label(&self, taxonomy: &str) -> Option<String>;
}
