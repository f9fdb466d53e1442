//! Sitemap rendering for the smap engine.
//!
//! Turns a [`SitemapConfig`](smap_config::SitemapConfig) into an HTML
//! fragment by reading content through a [`ContentStore`](smap_store::ContentStore).
//!
//! # Pipeline
//!
//! Each configured section goes through three stages:
//! - [`list_section`]: query the store and flatten items or terms into [`Entry`] values
//! - [`render_tree`]: emit `<li>` markup, nested by parent when hierarchical
//! - [`Sitemap`]: title the block, substitute the placeholder for empty
//!   sections and wrap everything in the sitemap container
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use smap_config::SitemapConfig;
//! use smap_render::Sitemap;
//! use smap_store::{Item, MemoryStore};
//!
//! let store = MemoryStore::new()
//!     .with_content_type("page", "Pages")
//!     .with_item("page", Item::new(1, "About").with_url("/about/"));
//!
//! let mut settings = smap_config::RawSettings::new();
//! settings.insert("sections".to_owned(), serde_json::json!([{ "content_type": "page" }]));
//!
//! let html = Sitemap::new(Arc::new(store)).render(&SitemapConfig::from_settings(&settings));
//! assert!(html.contains(r#"<a href="/about/">About</a>"#));
//! ```

mod html;
mod lister;
mod sitemap;
mod tree;

pub use html::escape_html;
pub use lister::{Entry, Listing, list_section};
pub use sitemap::{RenderedSection, Sitemap, SitemapStrings};
pub use tree::{RenderedTree, TreeOptions, render_tree};
