//! Configuration file handling
//!
//! A small TOML file under the platform config directory. Missing files are
//! not an error; read and parse failures are typed so the CLI can report
//! the offending path.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Backend used when no flag, environment variable, or config entry names one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable consulted between the CLI flag and the config file.
pub const BASE_URL_ENV: &str = "PHRASEDECK_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Backend base URL (e.g., "http://127.0.0.1:8000")
    pub base_url: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

/// Errors that can occur when loading configuration from disk.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse config at {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&Self::config_path())
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
            let config: Config =
                toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: config_path.to_path_buf(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn StdError>> {
        self.save_to_path(&Self::config_path())
    }

    pub(crate) fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };

        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(config_path)
            .map_err(|err| -> Box<dyn StdError> { Box::new(err) })?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "phrasedeck", "phrasedeck")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    pub fn print_all(&self) {
        println!("base-url: {}", self.base_url.as_deref().unwrap_or("(unset)"));
        println!("theme: {}", self.theme.as_deref().unwrap_or("(unset)"));
    }
}

/// Resolve the backend base URL: CLI flag, then environment, then config
/// file, then the built-in default.
pub fn resolve_base_url(flag: Option<&str>, config: &Config) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            return url;
        }
    }
    config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.base_url.is_none());
        assert!(config.theme.is_none());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            base_url: Some("http://vocab.internal:9000".to_string()),
            theme: Some("light".to_string()),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(
            loaded.base_url.as_deref(),
            Some("http://vocab.internal:9000")
        );
        assert_eq!(loaded.theme.as_deref(), Some("light"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().expect("typed error");
        assert!(matches!(config_err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn base_url_resolution_prefers_flag_over_config() {
        let config = Config {
            base_url: Some("http://from-config".to_string()),
            theme: None,
        };
        assert_eq!(
            resolve_base_url(Some("http://from-flag"), &config),
            "http://from-flag"
        );
        assert_eq!(resolve_base_url(None, &config), "http://from-config");
        assert_eq!(resolve_base_url(None, &Config::default()), DEFAULT_BASE_URL);
    }
}
