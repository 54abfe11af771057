//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\book-scout\config.toml
//! - macOS: ~/Library/Application Support/book-scout/config.toml
//! - Linux: ~/.config/book-scout/config.toml
//!
//! The config file is human-readable and editable. A different file can be
//! passed with `--config`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::SourceConfiguration;
use crate::search::validation::region_for_language;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search backend and session settings
    pub search: SearchConfig,

    /// Metadata enrichment settings
    pub metadata: MetadataConfig,

    /// Owned-book settings
    pub library: LibraryConfig,
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the raw search backend (`POST <url>/search`)
    pub backend_url: String,

    /// Result language: "english", "english-uk", "german", ...
    pub language: String,

    /// Quiet period before a typed query is searched
    pub debounce_ms: u64,

    /// Log every filtered-out result at info level
    pub log_filtered: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000/api".to_string(),
            language: "english".to_string(),
            debounce_ms: 1000,
            log_filtered: true,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Metadata enrichment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Marketplace region override (defaults to the search language's region)
    pub region: Option<String>,

    /// Metadata sources in priority order
    pub sources: Vec<SourceConfiguration>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            region: None,
            sources: vec![
                SourceConfiguration::new("Audimeta", "https://audimeta.de"),
                SourceConfiguration::new("Audnexus", "https://api.audnex.us"),
            ],
        }
    }
}

impl MetadataConfig {
    /// Region used for provider lookups.
    pub fn effective_region(&self, language: &str) -> String {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| region_for_language(language).to_string())
    }
}

/// Library settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Newline-separated list of owned ASINs / catalog ids
    pub asin_file: Option<PathBuf>,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("book-scout"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from an explicit path
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_config_path;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[[metadata.sources]]"));
        assert!(toml.contains("https://audimeta.de"));
    }

    #[test]
    fn test_default_sources_in_priority_order() {
        let sources = Config::default().metadata.sources;
        let names: Vec<_> = sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Audimeta", "Audnexus"]);
        assert!(sources.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[search]
language = "german"

[[metadata.sources]]
name = "Mirror"
base_url = "https://mirror.audnex.us"
enabled = false

[[metadata.sources]]
name = "Audimeta"
base_url = "https://audimeta.de"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified fields are set
        assert_eq!(config.search.language, "german");
        assert_eq!(config.metadata.sources.len(), 2);
        assert!(!config.metadata.sources[0].enabled);
        assert!(config.metadata.sources[1].enabled);

        // Other fields use defaults
        assert_eq!(config.search.debounce(), Duration::from_millis(1000));
        assert!(config.search.log_filtered);
        assert!(config.library.asin_file.is_none());
        assert_eq!(config.metadata.effective_region(&config.search.language), "de");
    }

    #[test]
    fn test_region_override() {
        let metadata = MetadataConfig {
            region: Some(" UK ".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.effective_region("english"), "uk");
        assert_eq!(MetadataConfig::default().effective_region("french"), "fr");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (path, _dir) = temp_config_path();
        let mut config = Config::default();
        config.search.debounce_ms = 250;
        config.library.asin_file = Some(PathBuf::from("/books/owned.txt"));
        config.metadata.sources.reverse();

        save_to(&config, &path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.search.debounce_ms, 250);
        assert_eq!(loaded.library.asin_file, Some(PathBuf::from("/books/owned.txt")));
        assert_eq!(loaded.metadata.sources[0].name, "Audnexus");
    }

    #[test]
    fn test_load_from_reports_errors() {
        let (path, _dir) = temp_config_path();
        assert!(matches!(load_from(&path), Err(ConfigError::Read(..))));

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[search\nlanguage = ").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(..))));
    }
}
