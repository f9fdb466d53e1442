//! Sitemap configuration for smap.
//!
//! Two layers live here:
//!
//! - [`SitemapConfig`] and friends: the typed form of the loosely typed
//!   settings a host stores per sitemap, resolved leniently by
//!   [`SitemapConfig::from_settings`].
//! - [`Config`]: the `smap.toml` file used by the command-line host, parsed
//!   with serde and discovered in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! `store.snapshot` supports `${VAR}` and `${VAR:-default}`.
//!
//! ## Example
//!
//! ```toml
//! [store]
//! snapshot = "${SITE_DIR:-.}/content.yaml"
//!
//! [sitemap]
//! title_tag = "h3"
//! add_nofollow = true
//!
//! [[sitemap.sections]]
//! content_type = "page"
//! hierarchical = true
//!
//! [strings]
//! none = "Nothing here yet"
//! ```

mod descriptor;
mod expand;
mod settings;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use smap_store::ItemId;

pub use descriptor::{
    GlobalSitemapOptions, SectionDescriptor, SectionSource, SitemapConfig, SourceKind, TitleTag,
};
pub use settings::RawSettings;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the content snapshot path.
    pub snapshot: Option<PathBuf>,
    /// Item being viewed, for current-item exclusion and highlighting.
    pub current_item_id: Option<ItemId>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "smap.toml";

/// Default snapshot filename, relative to the config directory.
const DEFAULT_SNAPSHOT: &str = "content.yaml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration (paths are relative strings from TOML).
    store: StoreConfigRaw,
    /// Sitemap settings, kept raw and resolved through [`SitemapConfig`].
    sitemap: RawSettings,
    /// User-facing strings.
    pub strings: StringsConfig,

    /// Resolved store configuration (set after loading).
    #[serde(skip)]
    pub store_resolved: StoreConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw store configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StoreConfigRaw {
    snapshot: Option<String>,
}

/// Resolved store configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StoreConfig {
    /// Content snapshot file.
    pub snapshot: PathBuf,
}

/// Localizable strings used in rendered output.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StringsConfig {
    /// Placeholder shown for sections without entries.
    pub none: String,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            none: "None".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`store.snapshot`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `smap.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Resolve the typed sitemap configuration.
    #[must_use]
    pub fn sitemap(&self) -> SitemapConfig {
        SitemapConfig::from_settings(&self.sitemap)
    }

    /// Raw sitemap settings as written in the file.
    #[must_use]
    pub fn sitemap_settings(&self) -> &RawSettings {
        &self.sitemap
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(snapshot) = &settings.snapshot {
            self.store_resolved.snapshot.clone_from(snapshot);
        }
        if let Some(current) = settings.current_item_id {
            self.sitemap
                .insert("current_item_id".to_owned(), Value::from(current));
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            store_resolved: StoreConfig {
                snapshot: base.join(DEFAULT_SNAPSHOT),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strings.none.trim().is_empty() {
            return Err(ConfigError::Validation(
                "strings.none cannot be empty".to_owned(),
            ));
        }
        if let Some(sections) = self.sitemap.get("sections")
            && !sections.is_array()
        {
            return Err(ConfigError::Validation(
                "sitemap.sections must be an array of tables".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in path settings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(snapshot) = self.store.snapshot.take() {
            self.store.snapshot = Some(expand::expand_path(&snapshot, "store.snapshot")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.store_resolved = StoreConfig {
            snapshot: config_dir.join(self.store.snapshot.as_deref().unwrap_or(DEFAULT_SNAPSHOT)),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));

        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/site/content.yaml")
        );
        assert_eq!(config.strings.none, "None");
        assert!(config.sitemap().sections.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.strings.none, "None");
        assert!(config.sitemap_settings().is_empty());
    }

    #[test]
    fn test_parse_sitemap_sections() {
        let toml = r#"
[sitemap]
title_tag = "h3"
add_nofollow = true
exclude_ids = [4, 9]

[[sitemap.sections]]
content_type = "page"
hierarchical = true
max_depth = 2

[[sitemap.sections]]
source_kind = "taxonomy"
taxonomy = "category"
hide_empty = "yes"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sitemap = config.sitemap();

        assert_eq!(sitemap.sections.len(), 2);
        assert_eq!(sitemap.sections[0].source_name(), "page");
        assert_eq!(sitemap.sections[0].depth_limit(), Some(2));
        assert_eq!(
            sitemap.sections[1].source,
            SectionSource::Taxonomy {
                name: "category".to_owned(),
                order_by: smap_store::TermOrderBy::Name,
                hide_empty: true,
            }
        );
        assert_eq!(sitemap.options.title_tag, TitleTag::H3);
        assert!(sitemap.options.add_nofollow);
        assert_eq!(sitemap.options.excluded_item_ids.len(), 2);
    }

    #[test]
    fn test_parse_strings() {
        let toml = r#"
[strings]
none = "Aucun"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.strings.none, "Aucun");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[store]
snapshot = "data/site.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/project/data/site.json")
        );
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_snapshot() {
        let toml = r#"
[store]
snapshot = "/var/lib/site.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/var/lib/site.yaml")
        );
    }

    #[test]
    fn test_apply_cli_settings_snapshot() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            snapshot: Some(PathBuf::from("/tmp/other.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/tmp/other.json")
        );
        assert!(config.sitemap().options.current_item_id.is_none());
    }

    #[test]
    fn test_apply_cli_settings_current_item() {
        let mut config = Config::default_with_base(Path::new("/site"));
        let overrides = CliSettings {
            current_item_id: Some(42),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.sitemap().options.current_item_id, Some(42));
        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/site/content.yaml")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));

        config.apply_cli_settings(&CliSettings::default());

        assert!(config.sitemap_settings().is_empty());
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("smap.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_discover_config_from_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = temp_dir.path().join("site");
        let nested = site.join("themes").join("default");
        fs::create_dir_all(&nested).unwrap();
        fs::write(site.join("smap.toml"), "").unwrap();

        let found = Config::discover_config_from(&nested);

        assert_eq!(found, Some(site.join("smap.toml")));
    }

    #[test]
    fn test_discover_config_from_prefers_nearest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("site");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("smap.toml"), "").unwrap();
        fs::write(nested.join("smap.toml"), "").unwrap();

        let found = Config::discover_config_from(&nested);

        assert_eq!(found, Some(nested.join("smap.toml")));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("smap.toml");
        fs::write(
            &path,
            r#"
[store]
snapshot = "content.json"

[[sitemap.sections]]
content_type = "post"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.store_resolved.snapshot,
            temp_dir.path().join("content.json")
        );
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.sitemap().sections.len(), 1);
    }

    #[test]
    fn test_load_from_file_expands_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SMAP_TEST_SNAPSHOT_DIR", "/srv/site");
        }
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("smap.toml");
        fs::write(
            &path,
            r#"
[store]
snapshot = "${SMAP_TEST_SNAPSHOT_DIR}/content.yaml"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.store_resolved.snapshot,
            PathBuf::from("/srv/site/content.yaml")
        );
        unsafe {
            std::env::remove_var("SMAP_TEST_SNAPSHOT_DIR");
        }
    }

    #[test]
    fn test_load_from_file_with_cli_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("smap.toml");
        fs::write(&path, "[sitemap]\nexclude_current_item = true\n").unwrap();
        let overrides = CliSettings {
            current_item_id: Some(7),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();
        let options = config.sitemap().options;

        assert_eq!(options.effective_exclusions().into_iter().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("smap.toml");
        fs::write(&path, "[sitemap\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/site"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_none_string() {
        let config: Config = toml::from_str("[strings]\nnone = \"  \"\n").unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("strings.none"));
    }

    #[test]
    fn test_validate_sections_must_be_array() {
        let config: Config = toml::from_str("[sitemap]\nsections = \"page\"\n").unwrap();

        let err = config.validate().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
