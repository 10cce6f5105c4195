//! # Store Configuration
//!
//! Which establishment to load, where its menu comes from and where the
//! session slices are kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_RESTAURANT_ID=default-restaurant                            │
//! │     BISTRO_THEME=dark                                                  │
//! │     BISTRO_DB_PATH=./bistro.db        (switches the source to sqlite)  │
//! │     BISTRO_STORAGE_PATH=./session.json                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bistro/bistro.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bistro.menu/bistro.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     default-restaurant, "modern" theme, sample menu                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bistro.toml
//! [session]
//! restaurant_id = "default-restaurant"
//! default_theme = "modern"
//!
//! [source]
//! kind = "sqlite"      # sample | sqlite
//! db_path = "./bistro.db"
//!
//! [storage]
//! path = "./session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use bistro_core::{DEFAULT_RESTAURANT_ID, DEFAULT_THEME};

use crate::error::{StoreError, StoreResult};

/// File name of the session storage document in the platform data dir.
pub const STORAGE_FILE_NAME: &str = "session.json";

// =============================================================================
// Source Kind
// =============================================================================

/// Where menu data is loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSourceKind {
    /// Built-in demo catalog.
    #[default]
    Sample,

    /// SQLite database at `source.db_path`.
    Sqlite,
}

impl std::fmt::Display for MenuSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuSourceKind::Sample => write!(f, "sample"),
            MenuSourceKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for MenuSourceKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sample" | "demo" => Ok(MenuSourceKind::Sample),
            "sqlite" | "db" | "database" => Ok(MenuSourceKind::Sqlite),
            other => Err(StoreError::Config(format!(
                "Unknown menu source: '{}'. Valid options: sample, sqlite",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Establishment loaded by `init()`.
    #[serde(default = "default_restaurant_id")]
    pub restaurant_id: String,

    /// Theme used until the user picks one.
    #[serde(default = "default_theme")]
    pub default_theme: String,
}

fn default_restaurant_id() -> String {
    DEFAULT_RESTAURANT_ID.to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            restaurant_id: default_restaurant_id(),
            default_theme: default_theme(),
        }
    }
}

/// Menu source selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: MenuSourceKind,

    /// Database file, required by the sqlite source.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Local storage location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage document. Defaults to `session.json` in the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (bistro.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    StoreError::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.session.restaurant_id.trim().is_empty() {
            return Err(StoreError::Config("restaurant_id must not be empty".into()));
        }

        if self.source.kind == MenuSourceKind::Sqlite && self.source.db_path.is_none() {
            return Err(StoreError::Config(
                "sqlite source requires source.db_path".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// [`StoreConfig::load`] passes the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup("BISTRO_RESTAURANT_ID") {
            debug!(restaurant_id = %id, "Overriding restaurant from environment");
            self.session.restaurant_id = id;
        }

        if let Some(theme) = lookup("BISTRO_THEME") {
            self.session.default_theme = theme;
        }

        if let Some(path) = lookup("BISTRO_DB_PATH") {
            debug!(path = %path, "Using sqlite menu source from environment");
            self.source.kind = MenuSourceKind::Sqlite;
            self.source.db_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("BISTRO_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "menu")
            .map(|dirs| dirs.config_dir().join("bistro.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn restaurant_id(&self) -> &str {
        &self.session.restaurant_id
    }

    pub fn default_theme(&self) -> &str {
        &self.session.default_theme
    }

    /// Resolved storage document path.
    ///
    /// Falls back to the working directory when the platform has no data
    /// dir.
    pub fn storage_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.path {
            return path.clone();
        }
        directories::ProjectDirs::from("com", "bistro", "menu")
            .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(STORAGE_FILE_NAME))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.restaurant_id(), DEFAULT_RESTAURANT_ID);
        assert_eq!(config.default_theme(), "modern");
        assert_eq!(config.source.kind, MenuSourceKind::Sample);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            [session]
            default_theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_theme(), "dark");
        assert_eq!(config.restaurant_id(), DEFAULT_RESTAURANT_ID);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_sqlite_requires_path() {
        let config: StoreConfig = toml::from_str(
            r#"
            [source]
            kind = "sqlite"
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StoreConfig::default();
        config.apply_overrides(env(&[
            ("BISTRO_THEME", "classic"),
            ("BISTRO_DB_PATH", "/tmp/menu.db"),
            ("BISTRO_STORAGE_PATH", "/tmp/session.json"),
        ]));

        assert_eq!(config.default_theme(), "classic");
        assert_eq!(config.source.kind, MenuSourceKind::Sqlite);
        assert_eq!(config.source.db_path, Some(PathBuf::from("/tmp/menu.db")));
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/session.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bistro.toml");
        std::fs::write(
            &path,
            "[session]\nrestaurant_id = \"uptown\"\n[storage]\npath = \"s.json\"\n",
        )
        .unwrap();

        let mut config: StoreConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        config.apply_overrides(env(&[]));
        assert_eq!(config.restaurant_id(), "uptown");
        assert_eq!(config.storage_path(), PathBuf::from("s.json"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bistro.toml");
        std::fs::write(&path, "[session\nrestaurant_id = ").unwrap();

        assert!(matches!(
            StoreConfig::load(Some(path)),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_source_kind_parse() {
        assert_eq!("SQLite".parse::<MenuSourceKind>().unwrap(), MenuSourceKind::Sqlite);
        assert!("redis".parse::<MenuSourceKind>().is_err());
    }
}
