//! Typed sitemap configuration resolved from raw host settings.
//!
//! [`SitemapConfig::from_settings`] is the single boundary between untyped
//! settings and the rest of the engine. Resolution never fails: missing or
//! unrecognized values fall back to documented defaults.
//!
//! # Section Keys
//!
//! | key                 | values                                          | default        |
//! |---------------------|-------------------------------------------------|----------------|
//! | `source_kind`       | `content_type` (`post_type`), `taxonomy`        | `content_type` |
//! | `content_type`      | registered content type name                    | `page`         |
//! | `taxonomy`          | registered taxonomy name                        | `category`     |
//! | `title`             | text                                            | empty          |
//! | `content_order_by`  | `date`, `title`, `menu_order`, `random`         | `date`         |
//! | `taxonomy_order_by` | `id`, `name`                                    | `name`         |
//! | `order`             | `asc`, `desc`                                   | `desc`         |
//! | `hierarchical`      | switch                                          | off            |
//! | `max_depth`         | non-negative integer, `0` is unlimited          | `0`            |
//! | `hide_empty`        | switch                                          | off            |
//!
//! # Global Keys
//!
//! `sections`, `exclude_ids`, `exclude_current_item`, `current_item_id`,
//! `show_password_protected`, `add_nofollow`, `title_tag` (default `h2`).

use std::collections::BTreeSet;

use serde_json::Value;
use smap_store::{ItemId, ItemOrderBy, SortDirection, TermOrderBy};

use crate::settings::{self, RawSettings};

const DEFAULT_CONTENT_TYPE: &str = "page";
const DEFAULT_TAXONOMY: &str = "category";

/// Which kind of registry a section draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// A content type (page, post, custom type).
    ContentType,
    /// A taxonomy (category, tag, custom classification).
    Taxonomy,
}

impl SourceKind {
    /// Stable identifier used in section keys and class names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentType => "content-type",
            Self::Taxonomy => "taxonomy",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "content_type" | "post_type" | "content-type" => Some(Self::ContentType),
            "taxonomy" => Some(Self::Taxonomy),
            _ => None,
        }
    }
}

/// Section source with its kind-specific options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionSource {
    /// Items of a content type.
    ContentType {
        /// Content type name.
        name: String,
        /// Item ordering key.
        order_by: ItemOrderBy,
    },
    /// Terms of a taxonomy.
    Taxonomy {
        /// Taxonomy name.
        name: String,
        /// Term ordering key.
        order_by: TermOrderBy,
        /// Leave out terms without classified items.
        hide_empty: bool,
    },
}

/// One configured sitemap block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionDescriptor {
    /// Source and kind-specific options.
    pub source: SectionSource,
    /// Explicit title; empty means "use the source's registered label".
    pub title: String,
    /// Ordering direction.
    pub direction: SortDirection,
    /// Render parent/child relations as nested lists.
    pub hierarchical: bool,
    /// Maximum nesting depth when hierarchical, `0` for unlimited.
    pub max_depth: usize,
}

impl Default for SectionDescriptor {
    fn default() -> Self {
        Self {
            source: SectionSource::ContentType {
                name: DEFAULT_CONTENT_TYPE.to_owned(),
                order_by: ItemOrderBy::default(),
            },
            title: String::new(),
            direction: SortDirection::default(),
            hierarchical: false,
            max_depth: 0,
        }
    }
}

impl SectionDescriptor {
    /// Resolve a section from its raw settings.
    ///
    /// Only the options of the selected kind are read; the other kind's keys
    /// may be present (hosts keep them around) and are ignored.
    #[must_use]
    pub fn from_settings(raw: &RawSettings) -> Self {
        let kind = settings::choice(raw, "source_kind", SourceKind::parse, SourceKind::ContentType);

        let source = match kind {
            SourceKind::ContentType => SectionSource::ContentType {
                name: source_name(raw, "content_type", DEFAULT_CONTENT_TYPE),
                order_by: settings::choice(
                    raw,
                    "content_order_by",
                    parse_item_order,
                    ItemOrderBy::default(),
                ),
            },
            SourceKind::Taxonomy => SectionSource::Taxonomy {
                name: source_name(raw, "taxonomy", DEFAULT_TAXONOMY),
                order_by: settings::choice(
                    raw,
                    "taxonomy_order_by",
                    parse_term_order,
                    TermOrderBy::default(),
                ),
                hide_empty: settings::switch(raw, "hide_empty", false),
            },
        };

        let max_depth = settings::unsigned(raw, "max_depth")
            .and_then(|depth| usize::try_from(depth).ok())
            .unwrap_or(0);

        Self {
            source,
            title: settings::string(raw, "title")
                .map(str::trim)
                .unwrap_or_default()
                .to_owned(),
            direction: settings::choice(raw, "order", parse_direction, SortDirection::default()),
            hierarchical: settings::switch(raw, "hierarchical", false),
            max_depth,
        }
    }

    /// Kind of source this section lists.
    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        match self.source {
            SectionSource::ContentType { .. } => SourceKind::ContentType,
            SectionSource::Taxonomy { .. } => SourceKind::Taxonomy,
        }
    }

    /// Content type or taxonomy name.
    #[must_use]
    pub fn source_name(&self) -> &str {
        match &self.source {
            SectionSource::ContentType { name, .. } | SectionSource::Taxonomy { name, .. } => name,
        }
    }

    /// Nesting limit for hierarchical rendering, `None` when unlimited.
    ///
    /// Flat sections ignore it and list every entry.
    #[must_use]
    pub fn depth_limit(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }
}

/// Element used for section titles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleTag {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
    Div,
    Span,
    P,
}

impl TitleTag {
    /// Element name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
        }
    }

    /// Parse an element name, `None` if not allowed.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            "div" => Some(Self::Div),
            "span" => Some(Self::Span),
            "p" => Some(Self::P),
            _ => None,
        }
    }
}

/// Options shared by every section of one sitemap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalSitemapOptions {
    /// Items omitted from every content section.
    pub excluded_item_ids: BTreeSet<ItemId>,
    /// Also omit the item being viewed.
    pub exclude_current_item: bool,
    /// Item being viewed, when the host knows it.
    pub current_item_id: Option<ItemId>,
    /// List password-protected items.
    pub show_password_protected: bool,
    /// Add `rel="nofollow"` to every link.
    pub add_nofollow: bool,
    /// Section title element.
    pub title_tag: TitleTag,
}

impl GlobalSitemapOptions {
    /// Resolve global options from raw settings.
    #[must_use]
    pub fn from_settings(raw: &RawSettings) -> Self {
        Self {
            excluded_item_ids: settings::id_set(raw, "exclude_ids"),
            exclude_current_item: settings::switch(raw, "exclude_current_item", false),
            current_item_id: settings::unsigned(raw, "current_item_id"),
            show_password_protected: settings::switch(raw, "show_password_protected", false),
            add_nofollow: settings::switch(raw, "add_nofollow", false),
            title_tag: settings::choice(raw, "title_tag", TitleTag::parse, TitleTag::default()),
        }
    }

    /// Every item id that content sections must leave out.
    #[must_use]
    pub fn effective_exclusions(&self) -> BTreeSet<ItemId> {
        let mut excluded = self.excluded_item_ids.clone();
        if self.exclude_current_item
            && let Some(current) = self.current_item_id
        {
            excluded.insert(current);
        }
        excluded
    }
}

/// Complete configuration of one sitemap render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Sections in display order.
    pub sections: Vec<SectionDescriptor>,
    /// Shared options.
    pub options: GlobalSitemapOptions,
}

impl SitemapConfig {
    /// Resolve the whole sitemap from raw settings.
    ///
    /// `sections` must be an array; entries that are not mappings resolve to
    /// a default section so the configured count is preserved.
    #[must_use]
    pub fn from_settings(raw: &RawSettings) -> Self {
        let empty = RawSettings::new();
        let sections = match raw.get("sections") {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| match entry {
                    Value::Object(section) => SectionDescriptor::from_settings(section),
                    other => {
                        tracing::debug!(value = %other, "Section entry is not a mapping");
                        SectionDescriptor::from_settings(&empty)
                    }
                })
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                tracing::debug!(value = %other, "Ignoring non-array sections setting");
                Vec::new()
            }
        };

        Self {
            sections,
            options: GlobalSitemapOptions::from_settings(raw),
        }
    }
}

fn source_name(raw: &RawSettings, key: &str, default: &str) -> String {
    settings::string(raw, key)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(default)
        .to_owned()
}

fn parse_item_order(value: &str) -> Option<ItemOrderBy> {
    match value {
        "date" | "post_date" => Some(ItemOrderBy::Date),
        "title" | "post_title" => Some(ItemOrderBy::Title),
        "menu_order" => Some(ItemOrderBy::MenuOrder),
        "random" | "rand" => Some(ItemOrderBy::Random),
        _ => None,
    }
}

fn parse_term_order(value: &str) -> Option<TermOrderBy> {
    match value {
        "id" | "term_id" => Some(TermOrderBy::Id),
        "name" => Some(TermOrderBy::Name),
        _ => None,
    }
}

fn parse_direction(value: &str) -> Option<SortDirection> {
    match value {
        "asc" | "ascending" => Some(SortDirection::Ascending),
        "desc" | "descending" => Some(SortDirection::Descending),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawSettings {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_section_defaults() {
        let section = SectionDescriptor::from_settings(&RawSettings::new());

        assert_eq!(section, SectionDescriptor::default());
        assert_eq!(section.source_kind(), SourceKind::ContentType);
        assert_eq!(section.source_name(), "page");
        assert_eq!(section.direction, SortDirection::Descending);
        assert_eq!(section.max_depth, 0);
    }

    #[test]
    fn test_section_content_type() {
        let section = SectionDescriptor::from_settings(&raw(json!({
            "source_kind": "post_type",
            "content_type": "product",
            "title": "  Products ",
            "content_order_by": "menu_order",
            "order": "ASC",
            "hierarchical": "yes",
            "max_depth": "2",
            "taxonomy_order_by": "id"
        })));

        assert_eq!(
            section.source,
            SectionSource::ContentType {
                name: "product".to_owned(),
                order_by: ItemOrderBy::MenuOrder,
            }
        );
        assert_eq!(section.title, "Products");
        assert_eq!(section.direction, SortDirection::Ascending);
        assert!(section.hierarchical);
        assert_eq!(section.max_depth, 2);
        assert_eq!(section.depth_limit(), Some(2));
    }

    #[test]
    fn test_section_taxonomy() {
        let section = SectionDescriptor::from_settings(&raw(json!({
            "source_kind": "taxonomy",
            "taxonomy": "post_tag",
            "taxonomy_order_by": "id",
            "hide_empty": true
        })));

        assert_eq!(
            section.source,
            SectionSource::Taxonomy {
                name: "post_tag".to_owned(),
                order_by: TermOrderBy::Id,
                hide_empty: true,
            }
        );
        assert_eq!(section.source_kind(), SourceKind::Taxonomy);
        assert_eq!(section.source_name(), "post_tag");
    }

    #[test]
    fn test_section_unrecognized_values_fall_back() {
        let section = SectionDescriptor::from_settings(&raw(json!({
            "source_kind": "menu",
            "content_type": "",
            "content_order_by": "popularity",
            "order": "sideways",
            "max_depth": -3,
            "hierarchical": "perhaps"
        })));

        assert_eq!(section, SectionDescriptor::default());
    }

    #[test]
    fn test_depth_limit() {
        let mut section = SectionDescriptor::default();
        assert_eq!(section.depth_limit(), None);

        section.max_depth = 1;
        assert_eq!(section.depth_limit(), Some(1));
    }

    #[test]
    fn test_global_defaults() {
        let options = GlobalSitemapOptions::from_settings(&RawSettings::new());

        assert_eq!(options, GlobalSitemapOptions::default());
        assert_eq!(options.title_tag, TitleTag::H2);
    }

    #[test]
    fn test_global_options() {
        let options = GlobalSitemapOptions::from_settings(&raw(json!({
            "exclude_ids": "4, 8",
            "exclude_current_item": "yes",
            "current_item_id": 15,
            "show_password_protected": true,
            "add_nofollow": "yes",
            "title_tag": "H4"
        })));

        assert_eq!(options.excluded_item_ids, BTreeSet::from([4, 8]));
        assert!(options.exclude_current_item);
        assert_eq!(options.current_item_id, Some(15));
        assert!(options.show_password_protected);
        assert!(options.add_nofollow);
        assert_eq!(options.title_tag, TitleTag::H4);
        assert_eq!(options.effective_exclusions(), BTreeSet::from([4, 8, 15]));
    }

    #[test]
    fn test_effective_exclusions_ignores_current_unless_enabled() {
        let options = GlobalSitemapOptions {
            current_item_id: Some(3),
            ..GlobalSitemapOptions::default()
        };

        assert!(options.effective_exclusions().is_empty());
    }

    #[test]
    fn test_title_tag_rejects_unknown_elements() {
        let options = GlobalSitemapOptions::from_settings(&raw(json!({ "title_tag": "script" })));

        assert_eq!(options.title_tag, TitleTag::H2);
    }

    #[test]
    fn test_sitemap_config_preserves_section_order() {
        let config = SitemapConfig::from_settings(&raw(json!({
            "sections": [
                { "source_kind": "taxonomy", "taxonomy": "category" },
                { "content_type": "post" },
                "garbage"
            ],
            "add_nofollow": true
        })));

        assert_eq!(config.sections.len(), 3);
        assert_eq!(config.sections[0].source_name(), "category");
        assert_eq!(config.sections[1].source_name(), "post");
        assert_eq!(config.sections[2], SectionDescriptor::default());
        assert!(config.options.add_nofollow);
    }

    #[test]
    fn test_sitemap_config_without_sections() {
        let config = SitemapConfig::from_settings(&raw(json!({ "sections": "page" })));

        assert!(config.sections.is_empty());
    }
}
