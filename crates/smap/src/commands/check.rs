//! `smap check` command implementation.
//!
//! Resolves every configured section against the snapshot and reports the
//! sections whose source is not registered, which would render empty.

use std::sync::Arc;

use clap::Args;
use smap_config::{SectionDescriptor, SourceKind};
use smap_render::Sitemap;
use smap_store::ContentStore;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the snapshot cannot be loaded.
    /// Unregistered sources are reported as warnings only.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, store) = self.site.load()?;
        let store: Arc<dyn ContentStore> = Arc::new(store);
        let sitemap_config = config.sitemap();

        if sitemap_config.sections.is_empty() {
            output.warning("No sitemap sections configured");
            return Ok(());
        }

        let rendered = Sitemap::new(Arc::clone(&store)).render_sections(&sitemap_config);
        let mut unresolved = 0;
        for (section, block) in sitemap_config.sections.iter().zip(&rendered) {
            if is_registered(store.as_ref(), section) {
                output.info(&format!("{}: {} entries", block.section_key, block.entry_count));
            } else {
                unresolved += 1;
                output.warning(&format!(
                    "{}: {} '{}' is not registered",
                    block.section_key,
                    kind_label(section.source_kind()),
                    section.source_name()
                ));
            }
        }

        if unresolved == 0 {
            output.success(&format!("{} sections OK", rendered.len()));
        } else {
            output.warning(&format!(
                "{unresolved} of {} sections reference unregistered sources",
                rendered.len()
            ));
        }
        Ok(())
    }
}

/// True if the store knows the section's content type or taxonomy.
fn is_registered(store: &dyn ContentStore, section: &SectionDescriptor) -> bool {
    let name = section.source_name();
    match section.source_kind() {
        SourceKind::ContentType => store.type_label(name).is_some(),
        SourceKind::Taxonomy => store.taxonomy_label(name).is_some(),
    }
}

fn kind_label(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::ContentType => "content type",
        SourceKind::Taxonomy => "taxonomy",
    }
}
