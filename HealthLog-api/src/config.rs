//! Application configuration read from the environment
//!
//! `.env` is loaded by the binary before [`AppConfig::from_env`] runs.

use std::env;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use health_log_data::database::{DatabaseConfig, DatabaseError};
use health_log_domain::entities::Locale;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Settings for the HTTP service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to listen on
    pub port: u16,
    /// Deployment environment name reported by the health check
    pub environment: String,
    /// Directory holding the SQLite file
    pub data_dir: PathBuf,
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// Offset used to group readings into local days
    pub utc_offset: FixedOffset,
    /// Language of advisory messages when a request does not ask for one
    pub default_locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("data");
        Self {
            port: 3000,
            environment: "development".to_string(),
            database: DatabaseConfig {
                sqlite_path: data_dir.join("health_log.db").to_string_lossy().into_owned(),
                ..DatabaseConfig::default()
            },
            data_dir,
            utc_offset: Utc.fix(),
            default_locale: Locale::En,
        }
    }
}

impl AppConfig {
    /// Read the configuration from environment variables
    ///
    /// `PORT`, `APP_ENV`, `DATA_DIR`, `HEALTH_LOG_UTC_OFFSET_MINUTES` and
    /// `HEALTH_LOG_LOCALE` are all optional; the pool settings come from
    /// [`DatabaseConfig::from_env`]. A value that is present but malformed
    /// is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var("PORT")?.unwrap_or(defaults.port);
        let environment = env::var("APP_ENV").unwrap_or(defaults.environment);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let mut database = DatabaseConfig::from_env()?;
        if env::var("DB_SQLITE_PATH").is_err() {
            database.sqlite_path = data_dir.join("health_log.db").to_string_lossy().into_owned();
        }

        let utc_offset = match parse_var::<i32>("HEALTH_LOG_UTC_OFFSET_MINUTES")? {
            Some(minutes) => offset_from_minutes(minutes).ok_or(ConfigError::InvalidValue {
                name: "HEALTH_LOG_UTC_OFFSET_MINUTES",
                value: minutes.to_string(),
            })?,
            None => defaults.utc_offset,
        };

        let default_locale = match env::var("HEALTH_LOG_LOCALE") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "HEALTH_LOG_LOCALE",
                value: raw,
            })?,
            Err(_) => defaults.default_locale,
        };

        Ok(Self {
            port,
            environment,
            data_dir,
            database,
            utc_offset,
            default_locale,
        })
    }
}

/// Offset east of UTC in minutes; `None` outside +/- 24 hours
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
        assert_eq!(config.default_locale, Locale::En);
        assert!(config.database.sqlite_path.ends_with("health_log.db"));
    }

    #[test]
    fn test_offset_from_minutes() {
        assert_eq!(offset_from_minutes(480).unwrap().local_minus_utc(), 8 * 3600);
        assert_eq!(offset_from_minutes(-300).unwrap().local_minus_utc(), -5 * 3600);
        assert!(offset_from_minutes(24 * 60).is_none());
        assert!(offset_from_minutes(i32::MAX).is_none());
    }
}
