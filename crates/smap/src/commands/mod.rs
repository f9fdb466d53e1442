//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use std::path::PathBuf;

use clap::Args;
use smap_config::{CliSettings, Config};
use smap_store_fs::SnapshotStore;

use crate::error::CliError;

/// Arguments shared by every command that reads a site.
#[derive(Args, Debug)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover smap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content snapshot, YAML or JSON (overrides config).
    #[arg(short, long, env = "SMAP_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Identifier of the item being viewed.
    #[arg(long, value_name = "ID")]
    current: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration and open the content snapshot it points at.
    fn load(&self) -> Result<(Config, SnapshotStore), CliError> {
        let cli_settings = CliSettings {
            snapshot: self.snapshot.clone(),
            current_item_id: self.current,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let store = SnapshotStore::open(&config.store_resolved.snapshot)?;
        tracing::info!(
            config = ?config.config_path,
            snapshot = %config.store_resolved.snapshot.display(),
            "Loaded site"
        );
        Ok((config, store))
    }
}
