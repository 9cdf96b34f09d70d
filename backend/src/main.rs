//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use places_backend::inbound::http::health::HealthState;
use places_backend::outbound::persistence::{DbPool, run_pending_migrations};
use places_backend::settings::AppSettings;
use server::{GeocoderChoice, ServerConfig, create_server};

fn io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

async fn server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let mut config = ServerConfig::new(
        settings.bind_addr().map_err(io_error)?,
        settings.jwt_secret().map_err(io_error)?,
        settings.upload_dir(),
    )
    .with_seed_fixtures(settings.seed_fixtures);

    if let Some(pool_config) = settings.pool_config() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(io_error)?;
        let pool = DbPool::new(pool_config).await.map_err(io_error)?;
        config = config.with_db_pool(pool);
    }

    if let Some(api_key) = settings.geocoding_api_key() {
        config = config.with_geocoder(GeocoderChoice::Google {
            endpoint: settings.geocoding_endpoint().map_err(io_error)?,
            api_key: api_key.to_owned(),
            timeout: settings.geocoding_timeout(),
        });
    }
    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(io_error)?;
    info!(?settings, "settings loaded");
    let config = server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
