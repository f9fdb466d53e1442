//! `smap render` command implementation.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use smap_config::Config;
use smap_render::{Sitemap, SitemapStrings};
use smap_store_fs::SnapshotStore;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Write the sitemap to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the snapshot cannot be loaded,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (config, store) = self.site.load()?;
        let html = render_html(&config, store);
        tracing::info!(bytes = html.len(), "Rendered sitemap");

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                Output::new().success(&format!("Sitemap written to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Render the configured sitemap from an opened store.
fn render_html(config: &Config, store: SnapshotStore) -> String {
    let strings = SitemapStrings {
        none: config.strings.none.clone(),
    };
    Sitemap::new(Arc::new(store))
        .with_strings(strings)
        .render(&config.sitemap())
}
