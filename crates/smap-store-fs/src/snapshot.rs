//! Snapshot file model and parsing.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use smap_store::{Item, MemoryStore, StoreError, StoreErrorKind, Term};

use crate::BACKEND;

/// Supported snapshot encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SnapshotFormat {
    Yaml,
    Json,
}

impl SnapshotFormat {
    /// Detect the format from a file extension.
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Whole-site content snapshot.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Snapshot {
    pub(crate) content_types: BTreeMap<String, ContentTypeSnapshot>,
    pub(crate) taxonomies: BTreeMap<String, TaxonomySnapshot>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentTypeSnapshot {
    label: Option<String>,
    items: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TaxonomySnapshot {
    label: Option<String>,
    terms: Vec<Term>,
}

impl Snapshot {
    /// Parse snapshot content in the given format.
    pub(crate) fn parse(content: &str, format: SnapshotFormat) -> Result<Self, StoreError> {
        let invalid = || StoreError::new(StoreErrorKind::InvalidFormat).with_backend(BACKEND);
        match format {
            SnapshotFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| invalid().with_source(e))
            }
            SnapshotFormat::Json => {
                serde_json::from_str(content).map_err(|e| invalid().with_source(e))
            }
        }
    }

    /// Register every content type and taxonomy and load their records.
    ///
    /// A missing label falls back to the registration name.
    pub(crate) fn into_store(self) -> MemoryStore {
        let mut store = MemoryStore::new();

        for (name, content_type) in self.content_types {
            let label = content_type.label.unwrap_or_else(|| name.clone());
            store.register_content_type(name.clone(), label);
            for item in content_type.items {
                store.insert_item(name.clone(), item);
            }
        }

        for (name, taxonomy) in self.taxonomies {
            let label = taxonomy.label.unwrap_or_else(|| name.clone());
            store.register_taxonomy(name.clone(), label);
            for term in taxonomy.terms {
                store.insert_term(name.clone(), term);
            }
        }

        store
    }
}
