//! Configuration loading
//!
//! Settings are resolved field by field in this priority order:
//! 1. Command-line argument or environment variable (supplied as [`ConfigOverrides`])
//! 2. TOML config file
//! 3. Compiled default
//!
//! A missing config file is not an error; the service starts on defaults.
//! A config file that exists but cannot be parsed is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "discog";

pub const DEFAULT_BAND: &str = "Pearl Jam";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Path to the SQLite catalog database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Band name reported in every response and used for the route prefix
    #[serde(default)]
    pub band: Option<String>,

    /// Treat album name as album identity in name lookups
    #[serde(default)]
    pub merge_albums_by_name: Option<bool>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Values taken from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub band: Option<String>,
    pub merge_albums_by_name: Option<bool>,
    pub log_level: Option<String>,
}

/// Where the TOML layer of the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub band: String,
    pub merge_albums_by_name: bool,
    pub log_level: String,
    pub source: ConfigSource,
}

impl ServiceConfig {
    /// Resolve configuration from overrides, the config file and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let (file, source) = match &overrides.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                (TomlConfig::from_file(path)?, ConfigSource::File(path.clone()))
            }
            None => match default_config_file() {
                Some(path) => (TomlConfig::from_file(&path)?, ConfigSource::File(path)),
                None => (TomlConfig::default(), ConfigSource::Defaults),
            },
        };

        Self::merge(overrides, file, source)
    }

    /// Layer overrides on top of a parsed config file
    pub fn merge(
        overrides: ConfigOverrides,
        file: TomlConfig,
        source: ConfigSource,
    ) -> Result<Self> {
        let band = overrides
            .band
            .or(file.band)
            .unwrap_or_else(|| DEFAULT_BAND.to_string());

        if band_slug(&band).is_empty() {
            return Err(Error::Config(format!(
                "Band name '{}' has no characters usable in a URL",
                band
            )));
        }

        Ok(Self {
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            band,
            merge_albums_by_name: overrides
                .merge_albums_by_name
                .or(file.merge_albums_by_name)
                .unwrap_or(false),
            log_level: overrides
                .log_level
                .or(file.logging.level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            source,
        })
    }

    /// Route prefix for catalog endpoints, e.g. `/api/pearl-jam`
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", band_slug(&self.band))
    }
}

/// Lowercase, hyphen-separated form of a band name
///
/// `"Pearl Jam"` becomes `"pearl-jam"`. Runs of anything other than ASCII
/// letters and digits collapse into a single hyphen.
pub fn band_slug(band: &str) -> String {
    band.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// First existing config file in the platform search path
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./discog_data"))
        .join("catalog.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_slug() {
        assert_eq!(band_slug("Pearl Jam"), "pearl-jam");
        assert_eq!(band_slug("  Mother Love  Bone!"), "mother-love-bone");
        assert_eq!(band_slug("Temple of the Dog"), "temple-of-the-dog");
        assert_eq!(band_slug("!!!"), "");
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let file = TomlConfig {
            port: Some(8080),
            band: Some("Mudhoney".to_string()),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            port: Some(9000),
            ..Default::default()
        };

        let config = ServiceConfig::merge(overrides, file, ConfigSource::Defaults).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.band, "Mudhoney");
        assert_eq!(config.api_prefix(), "/api/mudhoney");
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServiceConfig::merge(
            ConfigOverrides::default(),
            TomlConfig::default(),
            ConfigSource::Defaults,
        )
        .unwrap();

        assert_eq!(config.band, DEFAULT_BAND);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.merge_albums_by_name);
        assert_eq!(config.database_path, default_database_path());
        assert_eq!(config.api_prefix(), "/api/pearl-jam");
    }

    #[test]
    fn test_unusable_band_name_rejected() {
        let overrides = ConfigOverrides {
            band: Some("???".to_string()),
            ..Default::default()
        };

        let result = ServiceConfig::merge(overrides, TomlConfig::default(), ConfigSource::Defaults);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
