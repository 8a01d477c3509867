//! Application configuration from environment variables.
//!
//! Credentials and the session secret were hardcoded in earlier
//! iterations of this application; they are now required environment
//! variables with no compiled-in fallback.

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{GEOCODE_TIMEOUT_SECS, NOMINATIM_URL, PHOTON_URL};
use crate::env_config::{env_opt, env_parse_with_default};

/// Configuration error: a required variable is missing.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Runtime configuration for the trove service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Login username (`TROVE_USERNAME`, required).
    pub username: String,
    /// Login password (`TROVE_PASSWORD`, required).
    pub password: String,
    /// SQLite database file (`TROVE_DB_PATH`).
    pub db_path: PathBuf,
    /// Directory for uploaded images and generated QR files (`TROVE_UPLOAD_DIR`).
    pub upload_dir: PathBuf,
    /// Base URL encoded into QR labels (`TROVE_PUBLIC_URL`).
    pub public_url: String,
    /// Nominatim endpoint (`TROVE_NOMINATIM_URL`).
    pub nominatim_url: String,
    /// Photon endpoint (`TROVE_PHOTON_URL`).
    pub photon_url: String,
    /// Per-provider geocoding timeout in seconds (`TROVE_GEOCODE_TIMEOUT_SECS`).
    pub geocode_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    /// Returns an error when `TROVE_USERNAME` or `TROVE_PASSWORD` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let username = env_opt("TROVE_USERNAME").ok_or(ConfigError::MissingVar("TROVE_USERNAME"))?;
        let password = env_opt("TROVE_PASSWORD").ok_or(ConfigError::MissingVar("TROVE_PASSWORD"))?;

        Ok(Self {
            username,
            password,
            db_path: env_opt("TROVE_DB_PATH").map_or_else(|| PathBuf::from("trove.db"), PathBuf::from),
            upload_dir: env_opt("TROVE_UPLOAD_DIR")
                .map_or_else(|| PathBuf::from("uploads"), PathBuf::from),
            public_url: env_opt("TROVE_PUBLIC_URL")
                .unwrap_or_else(|| "http://127.0.0.1:8080".to_owned()),
            nominatim_url: env_opt("TROVE_NOMINATIM_URL")
                .unwrap_or_else(|| NOMINATIM_URL.to_owned()),
            photon_url: env_opt("TROVE_PHOTON_URL").unwrap_or_else(|| PHOTON_URL.to_owned()),
            geocode_timeout_secs: env_parse_with_default(
                "TROVE_GEOCODE_TIMEOUT_SECS",
                GEOCODE_TIMEOUT_SECS,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail() {
        std::env::remove_var("TROVE_USERNAME");
        std::env::remove_var("TROVE_PASSWORD");
        assert!(AppConfig::from_env().is_err());
    }
}
