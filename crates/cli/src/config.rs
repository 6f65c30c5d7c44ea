use anyhow::{Context, Result};
use beerlog_catalog::SqliteConfig;
use beerlog_map::MapConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "beerlog.toml";

/// Database used when neither `--db`, `BEERLOG_DB` nor the config names one
pub const DEFAULT_DATABASE: &str = "beerlog.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: SqliteConfig::default().busy_timeout_ms,
        }
    }
}

impl DatabaseConfig {
    pub fn sqlite(&self) -> SqliteConfig {
        SqliteConfig {
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }

    /// `--db` / `BEERLOG_DB` first, then the config file, then the default
    pub fn resolve_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

impl AppConfig {
    /// Load `explicit`, or `beerlog.toml` when present, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config {}", path.display()))?;
        let config = Self::parse(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.map.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::parse(
            r##"
            [database]
            path = "data/stores.db"
            busy_timeout_ms = 250

            [map]
            zoom = 14
            palette = ["#111111", "#222222"]
            legend_title = "Brands"

            [map.center]
            lat = 34.69
            lng = 135.50
            "##,
        )
        .unwrap();

        assert_eq!(config.database.sqlite().busy_timeout_ms, 250);
        assert_eq!(config.map.zoom, 14);
        assert_eq!(config.map.palette.len(), 2);
        assert_eq!(config.map.legend_title, "Brands");
        assert_eq!(config.map.center.lat, 34.69);
        assert_eq!(config.map.popup_max_width, 300);
    }

    #[test]
    fn test_unknown_keys_and_invalid_values_rejected() {
        assert!(AppConfig::parse("[map]\nzom = 3\n").is_err());
        assert!(AppConfig::parse("[map]\nzoom = 42\n").is_err());
        assert!(AppConfig::parse("[map]\nfallback_color = \"grey\"\n").is_err());
    }

    #[test]
    fn test_database_path_precedence() {
        let config = DatabaseConfig {
            path: Some(PathBuf::from("from-config.db")),
            ..DatabaseConfig::default()
        };
        assert_eq!(
            config.resolve_path(Some(Path::new("flag.db"))),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.resolve_path(None), PathBuf::from("from-config.db"));
        assert_eq!(
            DatabaseConfig::default().resolve_path(None),
            PathBuf::from(DEFAULT_DATABASE)
        );
    }
}
