use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
///
/// Loaded from `<config_dir>/fcards/config.toml`. CLI flags win over the file,
/// the file wins over defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path; a missing file means defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Get the config file path
    /// Uses XDG on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("fcards");

        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the data directory, creating it if needed
    pub fn data_dir(&self) -> crate::Result<PathBuf> {
        let dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| crate::Error::ConfigError("Could not find home directory".into()))?
                .join(".fcards"),
        };
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Full path of the SQLite database
    pub fn db_path(&self) -> crate::Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.storage.db_file))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Where the database and log file live (default: ~/.fcards)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_db_file")]
    pub db_file: String,
}

fn default_db_file() -> String {
    "flashcards.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_file: default_db_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// syntect theme used for fenced code in answers
    #[serde(default = "default_code_theme")]
    pub code_theme: String,
}

fn default_code_theme() -> String {
    "base16-ocean.dark".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            code_theme: default_code_theme(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// tracing EnvFilter directive, RUST_LOG takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "fcards=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.db_file, "flashcards.db");
        assert_eq!(config.ui.code_theme, "base16-ocean.dark");
        assert_eq!(config.log.filter, "fcards=info");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[ui]\ncode_theme = \"InspiredGitHub\"\n").unwrap();
        assert_eq!(config.ui.code_theme, "InspiredGitHub");
        assert_eq!(config.log.filter, "fcards=info");
        assert_eq!(config.storage.db_file, "flashcards.db");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.storage.db_file, "flashcards.db");
    }

    #[test]
    fn test_load_from_file_resolves_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!("[storage]\ndata_dir = {:?}\ndb_file = \"deck.db\"\n", data),
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.storage.data_dir, Some(data.clone()));
        assert_eq!(loaded.db_path().unwrap(), data.join("deck.db"));
        assert!(data.is_dir());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::ConfigError(_)));
    }
}
