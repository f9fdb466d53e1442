//! Query vocabulary shared by store implementations and the sitemap engine.

use std::collections::BTreeSet;

use crate::store::ItemId;

/// Sort direction for item and term listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Ordering key for content items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemOrderBy {
    /// Publication date.
    #[default]
    Date,
    /// Item title, case-insensitive.
    Title,
    /// Manual menu order.
    MenuOrder,
    /// Shuffled on every query. Direction is ignored.
    Random,
}

/// Ordering key for taxonomy terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TermOrderBy {
    /// Term identifier.
    Id,
    /// Term name, case-insensitive.
    #[default]
    Name,
}

/// Filters and ordering for a content item listing.
///
/// Only published items are ever returned; the query narrows that set further.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemQuery {
    /// Item identifiers to leave out.
    pub exclude: BTreeSet<ItemId>,
    /// Whether password-protected items are listed.
    pub include_password_protected: bool,
    /// Ordering key.
    pub order_by: ItemOrderBy,
    /// Ordering direction.
    pub direction: SortDirection,
}

/// Filters and ordering for a taxonomy term listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermQuery {
    /// Leave out terms with no classified items.
    pub hide_empty: bool,
    /// Caller renders the parent relation. With `hide_empty`, empty terms
    /// that still have non-empty descendants are kept.
    pub hierarchical: bool,
    /// Ordering key.
    pub order_by: TermOrderBy,
    /// Ordering direction.
    pub direction: SortDirection,
}
