//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use places_backend::outbound::persistence::DbPool;
use url::Url;

/// Which geocoder the server resolves addresses with.
#[derive(Clone)]
pub enum GeocoderChoice {
    /// Every address resolves to the fixture coordinates.
    Fixture,
    /// Google Geocoding API.
    Google {
        endpoint: Url,
        api_key: String,
        timeout: Duration,
    },
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: String,
    pub(crate) upload_dir: String,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_fixtures: bool,
    pub(crate) geocoder: GeocoderChoice,
}

impl ServerConfig {
    /// In-memory store, fixture geocoder, no seed data.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: String, upload_dir: impl Into<String>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            upload_dir: upload_dir.into(),
            db_pool: None,
            seed_fixtures: false,
            geocoder: GeocoderChoice::Fixture,
        }
    }

    /// Persist documents in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the in-memory store with the fixture user and place. Ignored
    /// when a database pool is attached.
    #[must_use]
    pub fn with_seed_fixtures(mut self, seed: bool) -> Self {
        self.seed_fixtures = seed;
        self
    }

    #[must_use]
    pub fn with_geocoder(mut self, geocoder: GeocoderChoice) -> Self {
        self.geocoder = geocoder;
        self
    }
}
