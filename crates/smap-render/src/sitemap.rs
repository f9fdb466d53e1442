//! Sitemap assembly.
//!
//! [`Sitemap`] walks the configured sections in order, lists each one through
//! the store, renders its tree and wraps the result in a titled block.
//! Rendering never fails: unregistered sources, empty results and store
//! failures all come out as a section showing the "none" placeholder.

use std::fmt::Write;
use std::sync::Arc;

use smap_config::{RawSettings, SectionDescriptor, SitemapConfig, SourceKind};
use smap_store::ContentStore;

use crate::html::{class_token, escape_html};
use crate::lister::list_section;
use crate::tree::{TreeOptions, render_tree};

/// Localizable text used by the sitemap markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SitemapStrings {
    /// Placeholder shown in sections without entries.
    pub none: String,
}

impl Default for SitemapStrings {
    fn default() -> Self {
        Self {
            none: "None".to_owned(),
        }
    }
}

/// One rendered section block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedSection {
    /// `<kind>-<source_name>`, e.g. `content-type-page`.
    pub section_key: String,
    /// Kind of the section's source.
    pub kind: SourceKind,
    /// Title element, present even when the title is empty.
    pub title_html: String,
    /// Entry list, or the "none" placeholder.
    pub body_html: String,
    /// Number of rendered entries across all levels.
    pub entry_count: usize,
}

impl RenderedSection {
    /// Wrap title and body in the section container.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="sitemap-section sitemap-section-{}">{}{}</div>"#,
            self.kind.as_str(),
            self.title_html,
            self.body_html
        )
    }
}

/// Sitemap renderer bound to a content store.
pub struct Sitemap {
    store: Arc<dyn ContentStore>,
    strings: SitemapStrings,
}

impl Sitemap {
    /// Create a renderer with default strings.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            strings: SitemapStrings::default(),
        }
    }

    /// Replace the localizable strings.
    #[must_use]
    pub fn with_strings(mut self, strings: SitemapStrings) -> Self {
        self.strings = strings;
        self
    }

    /// Render the complete sitemap.
    ///
    /// Returns an empty string when no sections are configured.
    pub fn render(&self, config: &SitemapConfig) -> String {
        let sections = self.render_sections(config);
        if sections.is_empty() {
            return String::new();
        }

        let mut out = String::from(r#"<div class="sitemap-wrap">"#);
        for section in &sections {
            out.push_str(&section.to_html());
        }
        out.push_str("</div>");

        tracing::debug!(
            sections = sections.len(),
            entries = sections.iter().map(|s| s.entry_count).sum::<usize>(),
            "Rendered sitemap"
        );
        out
    }

    /// Resolve raw settings leniently, then render.
    pub fn render_settings(&self, raw: &RawSettings) -> String {
        self.render(&SitemapConfig::from_settings(raw))
    }

    /// Render each configured section, in configured order.
    pub fn render_sections(&self, config: &SitemapConfig) -> Vec<RenderedSection> {
        config
            .sections
            .iter()
            .map(|section| self.render_section(section, config))
            .collect()
    }

    fn render_section(
        &self,
        section: &SectionDescriptor,
        config: &SitemapConfig,
    ) -> RenderedSection {
        let options = &config.options;
        let kind = section.source_kind();
        let source_name = section.source_name();
        let listing = list_section(self.store.as_ref(), section, options);

        let title = if section.title.is_empty() {
            listing.label.clone().unwrap_or_default()
        } else {
            section.title.clone()
        };
        let tag = options.title_tag.as_str();
        let title_html = format!(
            r#"<{tag} class="sitemap-title">{}</{tag}>"#,
            escape_html(&title)
        );

        // Only content sections can contain the item being viewed.
        let current = match kind {
            SourceKind::ContentType => options.current_item_id,
            SourceKind::Taxonomy => None,
        };
        let tree = render_tree(
            &listing.entries,
            &TreeOptions {
                source_name,
                hierarchical: section.hierarchical,
                depth_limit: section.depth_limit(),
                nofollow: options.add_nofollow,
                current,
            },
        );

        let token = class_token(source_name);
        let body_html = if tree.is_empty() {
            format!(
                r#"<p class="sitemap-none">{}</p>"#,
                escape_html(&self.strings.none)
            )
        } else {
            let mut body = String::with_capacity(tree.html.len() + 64);
            write!(
                body,
                r#"<ul class="sitemap-list sitemap-{token}-list">{}</ul>"#,
                tree.html
            )
            .unwrap();
            body
        };

        RenderedSection {
            section_key: format!("{}-{token}", kind.as_str()),
            kind,
            title_html,
            body_html,
            entry_count: tree.entry_count,
        }
    }
}
