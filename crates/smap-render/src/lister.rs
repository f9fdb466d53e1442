//! Content listing for a single sitemap section.
//!
//! Translates a [`SectionDescriptor`] into a store query and flattens the
//! resulting items or terms into uniform [`Entry`] values for the tree
//! renderer. Store failures and unregistered sources never propagate: both
//! come back as an empty [`Listing`].

use smap_config::{GlobalSitemapOptions, SectionDescriptor, SectionSource};
use smap_store::{ContentStore, Item, ItemQuery, Term, TermQuery};

/// One listed item or term, stripped down to what rendering needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Item or term identifier.
    pub id: u64,
    /// Parent identifier from the store's parent relation.
    pub parent: Option<u64>,
    /// Display text.
    pub label: String,
    /// Link target. Empty renders the label without a link.
    pub url: String,
    /// Per-record class name (e.g. `page-item-4`, `cat-item-9`).
    pub record_class: String,
}

impl From<Item> for Entry {
    fn from(item: Item) -> Self {
        let label = if item.title.trim().is_empty() {
            format!("#{} (no title)", item.id)
        } else {
            item.title
        };
        Self {
            id: item.id,
            parent: item.parent,
            label,
            url: item.url,
            record_class: format!("page-item-{}", item.id),
        }
    }
}

impl From<Term> for Entry {
    fn from(term: Term) -> Self {
        Self {
            id: term.id,
            parent: term.parent,
            label: term.name,
            url: term.url,
            record_class: format!("cat-item-{}", term.id),
        }
    }
}

/// Result of listing one section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Registered label of the source, `None` if the source is unregistered.
    pub label: Option<String>,
    /// Entries in store order.
    pub entries: Vec<Entry>,
}

impl Listing {
    /// True if the section's source is registered with the store.
    pub fn is_registered(&self) -> bool {
        self.label.is_some()
    }
}

/// List the entries of one section.
pub fn list_section(
    store: &dyn ContentStore,
    section: &SectionDescriptor,
    options: &GlobalSitemapOptions,
) -> Listing {
    match &section.source {
        SectionSource::ContentType { name, order_by } => {
            let Some(label) = store.type_label(name) else {
                tracing::debug!(content_type = %name, "Sitemap section source is not registered");
                return Listing::default();
            };
            let query = ItemQuery {
                exclude: options.effective_exclusions(),
                include_password_protected: options.show_password_protected,
                order_by: *order_by,
                direction: section.direction,
            };
            let entries = match store.list_items(name, &query) {
                Ok(items) => items.into_iter().map(Entry::from).collect(),
                Err(e) => {
                    tracing::warn!(content_type = %name, error = %e, "Failed to list items");
                    Vec::new()
                }
            };
            Listing {
                label: Some(label),
                entries,
            }
        }
        SectionSource::Taxonomy {
            name,
            order_by,
            hide_empty,
        } => {
            let Some(label) = store.taxonomy_label(name) else {
                tracing::debug!(taxonomy = %name, "Sitemap section source is not registered");
                return Listing::default();
            };
            let query = TermQuery {
                hide_empty: *hide_empty,
                hierarchical: section.hierarchical,
                order_by: *order_by,
                direction: section.direction,
            };
            let entries = match store.list_terms(name, &query) {
                Ok(terms) => terms.into_iter().map(Entry::from).collect(),
                Err(e) => {
                    tracing::warn!(taxonomy = %name, error = %e, "Failed to list terms");
                    Vec::new()
                }
            };
            Listing {
                label: Some(label),
                entries,
            }
        }
    }
}
