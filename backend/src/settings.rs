//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from a `--flag`, a `PLACES_*` environment variable
//! or a config file. Unset values fall back to the defaults below; the
//! accessors resolve and validate them.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::outbound::geocoding::DEFAULT_GEOCODING_ENDPOINT;
use crate::outbound::persistence::PoolConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads/images";
pub const DEFAULT_GEOCODING_TIMEOUT_SECS: u64 = 10;
const DEV_JWT_SECRET: &str = "supersecret_dont_share";

/// Settings that cannot be turned into a running configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address {value:?} is not a socket address")]
    BindAddr { value: String },
    #[error("geocoding endpoint {value:?} is not a URL")]
    GeocodingEndpoint { value: String },
    #[error("PLACES_JWT_SECRET must be set outside debug builds")]
    MissingJwtSecret,
}

/// Runtime configuration for the places server and its tools.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLACES")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seed the in-memory store with the fixture user and place.
    #[ortho_config(default = false)]
    pub seed_fixtures: bool,
    /// Shared HS256 secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Directory uploaded images are written to.
    pub upload_dir: Option<String>,
    /// Google Geocoding API key; without it the fixture geocoder is used.
    pub geocoding_api_key: Option<String>,
    /// Override for the geocoding endpoint.
    pub geocoding_endpoint: Option<String>,
    /// Geocoding request timeout in seconds.
    pub geocoding_timeout_secs: Option<u64>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &redacted(&self.database_url))
            .field("db_max_connections", &self.db_max_connections)
            .field("seed_fixtures", &self.seed_fixtures)
            .field("jwt_secret", &redacted(&self.jwt_secret))
            .field("upload_dir", &self.upload_dir)
            .field("geocoding_api_key", &redacted(&self.geocoding_api_key))
            .field("geocoding_endpoint", &self.geocoding_endpoint)
            .field("geocoding_timeout_secs", &self.geocoding_timeout_secs)
            .finish()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AppSettings {
    /// Resolved bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = non_blank(&self.bind_addr).unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = non_blank(&self.database_url)?;
        let config = PoolConfig::new(url);
        Some(match self.db_max_connections {
            Some(max) => config.with_max_size(max),
            None => config,
        })
    }

    pub fn upload_dir(&self) -> &str {
        non_blank(&self.upload_dir).unwrap_or(DEFAULT_UPLOAD_DIR)
    }

    /// Token secret.
    ///
    /// Debug builds fall back to a well-known development secret.
    pub fn jwt_secret(&self) -> Result<String, SettingsError> {
        match non_blank(&self.jwt_secret) {
            Some(secret) => Ok(secret.to_owned()),
            None if cfg!(debug_assertions) => {
                warn!("PLACES_JWT_SECRET unset; using development secret");
                Ok(DEV_JWT_SECRET.to_owned())
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }

    pub fn geocoding_api_key(&self) -> Option<&str> {
        non_blank(&self.geocoding_api_key)
    }

    pub fn geocoding_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = non_blank(&self.geocoding_endpoint).unwrap_or(DEFAULT_GEOCODING_ENDPOINT);
        Url::parse(raw).map_err(|_| SettingsError::GeocodingEndpoint {
            value: raw.to_owned(),
        })
    }

    pub fn geocoding_timeout(&self) -> Duration {
        Duration::from_secs(
            self.geocoding_timeout_secs
                .unwrap_or(DEFAULT_GEOCODING_TIMEOUT_SECS),
        )
    }
}
