//! Snapshot file content store for the smap sitemap engine.
//!
//! This crate provides [`SnapshotStore`], a [`ContentStore`] backed by a
//! YAML or JSON file describing the site's content types, taxonomies, items
//! and terms. The file is read once; queries are served from memory.
//!
//! # Snapshot Format
//!
//! ```yaml
//! content_types:
//!   page:
//!     label: Pages
//!     items:
//!       - { id: 1, title: About, url: /about/ }
//!       - { id: 2, title: Team, url: /about/team/, parent: 1 }
//! taxonomies:
//!   category:
//!     label: Categories
//!     terms:
//!       - { id: 10, name: News, url: /category/news/, count: 4 }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use smap_store::ContentStore;
//! use smap_store_fs::SnapshotStore;
//!
//! let store = SnapshotStore::open("content.yaml")?;
//! let label = store.type_label("page");
//! ```

mod snapshot;

use std::fs;
use std::path::{Path, PathBuf};

use smap_store::{
    ContentStore, Item, ItemQuery, MemoryStore, StoreError, StoreErrorKind, Term, TermQuery,
};

use snapshot::{Snapshot, SnapshotFormat};

/// Backend identifier for error messages.
const BACKEND: &str = "Snapshot";

/// Content store loaded from a snapshot file.
#[derive(Debug)]
pub struct SnapshotStore {
    inner: MemoryStore,
    path: Option<PathBuf>,
}

impl SnapshotStore {
    /// Load a snapshot file. The format is chosen by extension:
    /// `.yaml`/`.yml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] with kind `NotFound` if the file is missing,
    /// `InvalidFormat` for an unknown extension or malformed content.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path).ok_or_else(|| {
            StoreError::new(StoreErrorKind::InvalidFormat)
                .with_backend(BACKEND)
                .with_path(path)
        })?;

        let content = fs::read_to_string(path)
            .map_err(|e| StoreError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;

        let snapshot = Snapshot::parse(&content, format).map_err(|e| e.with_path(path))?;

        tracing::debug!(
            path = %path.display(),
            content_types = snapshot.content_types.len(),
            taxonomies = snapshot.taxonomies.len(),
            "Loaded content snapshot"
        );

        Ok(Self {
            inner: snapshot.into_store(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse a YAML snapshot from a string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] with kind `InvalidFormat` if parsing fails.
    pub fn from_yaml_str(content: &str) -> Result<Self, StoreError> {
        Self::from_str_with(content, SnapshotFormat::Yaml)
    }

    /// Parse a JSON snapshot from a string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] with kind `InvalidFormat` if parsing fails.
    pub fn from_json_str(content: &str) -> Result<Self, StoreError> {
        Self::from_str_with(content, SnapshotFormat::Json)
    }

    fn from_str_with(content: &str, format: SnapshotFormat) -> Result<Self, StoreError> {
        let snapshot = Snapshot::parse(content, format)?;
        Ok(Self {
            inner: snapshot.into_store(),
            path: None,
        })
    }

    /// Path the snapshot was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ContentStore for SnapshotStore {
    fn list_items(&self, content_type: &str, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        self.inner.list_items(content_type, query)
    }

    fn list_terms(&self, taxonomy: &str, query: &TermQuery) -> Result<Vec<Term>, StoreError> {
        self.inner.list_terms(taxonomy, query)
    }

    fn type_label(&self, content_type: &str) -> Option<String> {
        self.inner.type_label(content_type)
    }

    fn taxonomy_label(&self, taxonomy: &str) -> Option<String> {
        self.inner.taxonomy_label(taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use smap_store::SortDirection;

    use super::*;

    const YAML: &str = r"
content_types:
  page:
    label: Pages
    items:
      - { id: 1, title: About, url: /about/ }
      - { id: 2, title: Team, url: /about/team/, parent: 1 }
      - { id: 3, title: Draft, status: draft }
  post: {}
taxonomies:
  category:
    label: Categories
    terms:
      - { id: 10, name: News, url: /category/news/, count: 4 }
      - { id: 11, name: Empty }
";

    #[test]
    fn test_from_yaml_str_lists_published_items() {
        let store = SnapshotStore::from_yaml_str(YAML).unwrap();

        let query = ItemQuery {
            direction: SortDirection::Ascending,
            ..ItemQuery::default()
        };
        let items = store.list_items("page", &query).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].parent, Some(1));
        assert_eq!(items[1].url, "/about/team/");
    }

    #[test]
    fn test_from_yaml_str_label_defaults_to_name() {
        let store = SnapshotStore::from_yaml_str(YAML).unwrap();

        assert_eq!(store.type_label("page").as_deref(), Some("Pages"));
        assert_eq!(store.type_label("post").as_deref(), Some("post"));
        assert_eq!(
            store.taxonomy_label("category").as_deref(),
            Some("Categories")
        );
        assert!(store.type_label("product").is_none());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "taxonomies": {
                "tag": { "terms": [{ "id": 5, "name": "rust", "count": 2 }] }
            }
        }"#;

        let store = SnapshotStore::from_json_str(json).unwrap();
        let terms = store.list_terms("tag", &TermQuery::default()).unwrap();

        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].name, "rust");
        assert!(store.type_label("page").is_none());
    }

    #[test]
    fn test_from_yaml_str_malformed_is_invalid_format() {
        let err = SnapshotStore::from_yaml_str("content_types: [1, 2").unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::InvalidFormat);
        assert_eq!(err.backend, Some("Snapshot"));
    }

    #[test]
    fn test_open_yaml_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("content.yml");
        fs::write(&path, YAML).unwrap();

        let store = SnapshotStore::open(&path).unwrap();

        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(
            store
                .list_terms("category", &TermQuery::default())
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = SnapshotStore::open(&path).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_open_unknown_extension_is_invalid_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("content.toml");
        fs::write(&path, "").unwrap();

        let err = SnapshotStore::open(&path).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::InvalidFormat);
    }

    #[test]
    fn test_open_malformed_json_keeps_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("content.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotStore::open(&path).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::InvalidFormat);
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
    }
}
