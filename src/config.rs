//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/tablebook/config.toml`,
//! override with `TABLEBOOK_CONFIG`). Missing file falls back to defaults;
//! a malformed file or invalid values fail startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::reservation::SortOrder;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub reservations: ReservationsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SeaORM connection URL
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./tablebook.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter, e.g. "info" or "tablebook=debug,info"
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Options of the reservations page component.
///
/// One field per recognized option; defaults match the shipped theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReservationsConfig {
    /// Reservations shown per page
    pub items_per_page: u32,
    /// Listing sort expression, validated against an allow-list
    pub sort_order: String,
    /// Page identifier of the account reservations page
    pub reservations_page: String,
    /// Request parameter carrying the reservation lookup hash
    pub hash_param_name: String,
}

impl Default for ReservationsConfig {
    fn default() -> Self {
        Self {
            items_per_page: 20,
            sort_order: "created_at desc".to_string(),
            reservations_page: "account/reservations".to_string(),
            hash_param_name: "hash".to_string(),
        }
    }
}

impl ReservationsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.items_per_page) {
            return Err(ConfigError::Invalid(format!(
                "reservations.items_per_page must be 1-100, got {}",
                self.items_per_page
            )));
        }

        if SortOrder::parse(&self.sort_order).is_none() {
            return Err(ConfigError::Invalid(format!(
                "reservations.sort_order '{}' is not a recognized sort expression",
                self.sort_order
            )));
        }

        if self.reservations_page.is_empty()
            || !self
                .reservations_page
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
        {
            return Err(ConfigError::Invalid(format!(
                "reservations.reservations_page '{}' must match [a-z0-9-_/]+",
                self.reservations_page
            )));
        }

        if self.hash_param_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "reservations.hash_param_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&raw)?
        } else {
            AppConfig::default()
        };

        config.reservations.validate()?;
        Ok(config)
    }
}

/// Default config file location (`~/.config/tablebook/config.toml`)
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tablebook")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_contract() {
        let config = ReservationsConfig::default();
        assert_eq!(config.items_per_page, 20);
        assert_eq!(config.sort_order, "created_at desc");
        assert_eq!(config.reservations_page, "account/reservations");
        assert_eq!(config.hash_param_name, "hash");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let raw = r#"
            [server]
            port = 9090

            [reservations]
            items_per_page = 10
            hash_param_name = "code"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.reservations.items_per_page, 10);
        assert_eq!(config.reservations.hash_param_name, "code");
        assert_eq!(config.reservations.sort_order, "created_at desc");
    }

    #[test]
    fn rejects_bad_sort_order() {
        let config = ReservationsConfig {
            sort_order: "id; drop table reservations".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        let config = ReservationsConfig {
            items_per_page: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_page_identifier() {
        let config = ReservationsConfig {
            reservations_page: "account/../admin".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tablebook-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let path = write_temp_config("malformed", "[server\nport = 9090");
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_rejects_invalid_values() {
        // Parses fine, but the sort expression is not in the allow-list;
        // this must surface as an error, not fall back to defaults.
        let raw = r#"
            [reservations]
            sort_order = "created_at dsc"
        "#;
        let path = write_temp_config("invalid-sort", raw);
        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_defaults_when_file_is_missing() {
        let path = std::env::temp_dir().join("tablebook-definitely-missing.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
