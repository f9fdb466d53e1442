//! In-memory content store.
//!
//! Provides [`MemoryStore`], which keeps registrations, items and terms in
//! memory and applies [`ItemQuery`]/[`TermQuery`] filtering and ordering itself.
//! Used directly in tests and as the backing store of file-based backends.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;

use crate::query::{ItemOrderBy, ItemQuery, TermOrderBy, TermQuery};
use crate::store::{ContentStore, Item, ItemStatus, StoreError, Term, TermId};

/// In-memory content store.
///
/// Use the builder methods to register content types and taxonomies and to
/// add records.
///
/// # Example
///
/// ```
/// use smap_store::{ContentStore, MemoryStore, Term, TermQuery};
///
/// let store = MemoryStore::new()
///     .with_taxonomy("category", "Categories")
///     .with_term("category", Term::new(1, "News").with_count(3));
///
/// let terms = store.list_terms("category", &TermQuery::default()).unwrap();
/// assert_eq!(terms.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    content_types: HashMap<String, String>,
    taxonomies: HashMap<String, String>,
    items: HashMap<String, Vec<Item>>,
    terms: HashMap<String, Vec<Term>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type with its display label.
    #[must_use]
    pub fn with_content_type(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.register_content_type(name, label);
        self
    }

    /// Register a taxonomy with its display label.
    #[must_use]
    pub fn with_taxonomy(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.register_taxonomy(name, label);
        self
    }

    /// Add an item of the given content type.
    #[must_use]
    pub fn with_item(mut self, content_type: impl Into<String>, item: Item) -> Self {
        self.insert_item(content_type, item);
        self
    }

    /// Add a term to the given taxonomy.
    #[must_use]
    pub fn with_term(mut self, taxonomy: impl Into<String>, term: Term) -> Self {
        self.insert_term(taxonomy, term);
        self
    }

    /// Register a content type with its display label.
    pub fn register_content_type(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.content_types.insert(name.into(), label.into());
    }

    /// Register a taxonomy with its display label.
    pub fn register_taxonomy(&mut self, name: impl Into<String>, label: impl Into<String>) {
        self.taxonomies.insert(name.into(), label.into());
    }

    /// Add an item of the given content type.
    ///
    /// Items of unregistered types are stored but never listed.
    pub fn insert_item(&mut self, content_type: impl Into<String>, item: Item) {
        self.items.entry(content_type.into()).or_default().push(item);
    }

    /// Add a term to the given taxonomy.
    ///
    /// Terms of unregistered taxonomies are stored but never listed.
    pub fn insert_term(&mut self, taxonomy: impl Into<String>, term: Term) {
        self.terms.entry(taxonomy.into()).or_default().push(term);
    }
}

impl ContentStore for MemoryStore {
    fn list_items(&self, content_type: &str, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        if !self.content_types.contains_key(content_type) {
            return Ok(Vec::new());
        }
        let Some(items) = self.items.get(content_type) else {
            return Ok(Vec::new());
        };

        let mut listed: Vec<Item> = items
            .iter()
            .filter(|item| item.status == ItemStatus::Publish)
            .filter(|item| !query.exclude.contains(&item.id))
            .filter(|item| query.include_password_protected || !item.password_protected)
            .cloned()
            .collect();

        sort_items(&mut listed, query);
        Ok(listed)
    }

    fn list_terms(&self, taxonomy: &str, query: &TermQuery) -> Result<Vec<Term>, StoreError> {
        if !self.taxonomies.contains_key(taxonomy) {
            return Ok(Vec::new());
        }
        let Some(terms) = self.terms.get(taxonomy) else {
            return Ok(Vec::new());
        };

        let mut listed: Vec<Term> = if query.hide_empty {
            let keep = non_empty_terms(terms, query.hierarchical);
            terms
                .iter()
                .filter(|term| keep.contains(&term.id))
                .cloned()
                .collect()
        } else {
            terms.clone()
        };

        sort_terms(&mut listed, query);
        Ok(listed)
    }

    fn type_label(&self, content_type: &str) -> Option<String> {
        self.content_types.get(content_type).cloned()
    }

    fn taxonomy_label(&self, taxonomy: &str) -> Option<String> {
        self.taxonomies.get(taxonomy).cloned()
    }
}

/// Order items per query; ties break on identifier.
fn sort_items(items: &mut [Item], query: &ItemQuery) {
    let direction = query.direction;
    match query.order_by {
        ItemOrderBy::Random => items.shuffle(&mut rand::rng()),
        ItemOrderBy::Date => items.sort_by(|a, b| {
            direction.apply(a.date.cmp(&b.date).then(a.id.cmp(&b.id)))
        }),
        ItemOrderBy::Title => items.sort_by(|a, b| {
            direction.apply(
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id)),
            )
        }),
        ItemOrderBy::MenuOrder => items.sort_by(|a, b| {
            direction.apply(a.menu_order.cmp(&b.menu_order).then(a.id.cmp(&b.id)))
        }),
    }
}

fn sort_terms(terms: &mut [Term], query: &TermQuery) {
    let direction = query.direction;
    match query.order_by {
        TermOrderBy::Id => terms.sort_by(|a, b| direction.apply(a.id.cmp(&b.id))),
        TermOrderBy::Name => terms.sort_by(|a, b| {
            direction.apply(
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id)),
            )
        }),
    }
}

/// Identifiers of terms that survive `hide_empty`.
///
/// A term survives if it classifies items itself or, when `hierarchical`,
/// if any descendant does.
fn non_empty_terms(terms: &[Term], hierarchical: bool) -> HashSet<TermId> {
    let mut keep: HashSet<TermId> = terms
        .iter()
        .filter(|term| term.count > 0)
        .map(|term| term.id)
        .collect();

    if hierarchical {
        let parents: HashMap<TermId, TermId> = terms
            .iter()
            .filter_map(|term| term.parent.map(|parent| (term.id, parent)))
            .collect();

        let seeds: Vec<TermId> = keep.iter().copied().collect();
        for seed in seeds {
            let mut current = seed;
            // Bounded by the term count so a cyclic parent relation terminates
            for _ in 0..terms.len() {
                let Some(&parent) = parents.get(&current) else {
                    break;
                };
                if !keep.insert(parent) {
                    break;
                }
                current = parent;
            }
        }
    }

    keep
}
