//! Builders turning [`ServerConfig`] into concrete adapters and HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use places_backend::domain::ports::{DocumentStore, FixtureGeocoder, Geocoder, ImageStore};
use places_backend::domain::{PlaceLifecycleService, UserAccountService};
use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
use places_backend::outbound::geocoding::GoogleGeocoder;
use places_backend::outbound::memory::MemoryDocumentStore;
use places_backend::outbound::persistence::DieselDocumentStore;
use places_backend::outbound::storage::LocalImageStore;
use places_backend::outbound::token::JwtTokenCodec;

use super::config::{GeocoderChoice, ServerConfig};

fn build_document_store(config: &ServerConfig) -> Arc<dyn DocumentStore> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "document store selected");
            Arc::new(DieselDocumentStore::new(pool.clone()))
        }
        None if config.seed_fixtures => {
            info!(store = "memory", seeded = true, "document store selected");
            Arc::new(MemoryDocumentStore::with_fixtures())
        }
        None => {
            info!(store = "memory", seeded = false, "document store selected");
            Arc::new(MemoryDocumentStore::new())
        }
    }
}

fn build_geocoder(choice: &GeocoderChoice) -> std::io::Result<Arc<dyn Geocoder>> {
    match choice {
        GeocoderChoice::Fixture => {
            info!(geocoder = "fixture", "geocoder selected");
            Ok(Arc::new(FixtureGeocoder))
        }
        GeocoderChoice::Google {
            endpoint,
            api_key,
            timeout,
        } => {
            info!(geocoder = "google", endpoint = %endpoint, "geocoder selected");
            let geocoder = GoogleGeocoder::new(endpoint.clone(), api_key.clone(), *timeout)
                .map_err(|err| std::io::Error::other(format!("geocoder client: {err}")))?;
            Ok(Arc::new(geocoder))
        }
    }
}

/// Wire services over the configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when the geocoding client cannot be built.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let store = build_document_store(config);
    let geocoder = build_geocoder(&config.geocoder)?;
    let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(config.upload_dir.clone()));

    let places = Arc::new(PlaceLifecycleService::new(
        Arc::clone(&store),
        geocoder,
        Arc::clone(&images),
    ));
    let accounts = Arc::new(UserAccountService::new(store));

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        places: places.clone(),
        places_command: places,
        users: accounts.clone(),
        signup: accounts.clone(),
        login: accounts,
        tokens: Arc::new(JwtTokenCodec::new(&config.jwt_secret)),
        images,
    })))
}
