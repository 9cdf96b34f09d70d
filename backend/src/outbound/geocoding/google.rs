//! Reqwest-backed Google geocoder.
//!
//! Owns transport concerns only: building the request, the client timeout,
//! mapping HTTP and API statuses to domain errors, and decoding the first
//! result's location.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{error, warn};

use super::dto::{GeocodeOutcome, GeocodeResponseDto};
use crate::domain::ports::Geocoder;
use crate::domain::{Coordinates, Error};

/// Public Google Geocoding endpoint.
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Message for an address the provider cannot place.
pub const NO_LOCATION_FOUND: &str = "Could not find location for the specified address.";
const GEOCODER_UNAVAILABLE: &str = "Geocoding service is unavailable, please try again later.";
const GEOCODER_FAILED: &str = "Could not resolve the address, please try again later.";

/// Geocoder issuing `GET {endpoint}?address=..&key=..`.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GoogleGeocoder {
    /// Build a geocoder with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
        })
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, Error> {
        let response = self
            .client
            .get(self.request_url(address))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_location(body.as_ref())
    }
}

fn parse_location(body: &[u8]) -> Result<Coordinates, Error> {
    let decoded: GeocodeResponseDto = serde_json::from_slice(body).map_err(|err| {
        error!(error = %err, "geocoding response could not be decoded");
        Error::internal(GEOCODER_FAILED)
    })?;
    match decoded.into_outcome() {
        GeocodeOutcome::Found(location) => Ok(location),
        GeocodeOutcome::NoMatch => Err(Error::invalid_request(NO_LOCATION_FOUND)),
        GeocodeOutcome::Rejected { status, detail } => {
            error!(%status, detail = detail.as_deref().unwrap_or(""), "geocoding request rejected");
            Err(Error::internal(GEOCODER_FAILED))
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> Error {
    warn!(error = %err, timeout = err.is_timeout(), "geocoding transport failed");
    Error::service_unavailable(GEOCODER_UNAVAILABLE)
}

fn map_status_error(status: StatusCode) -> Error {
    warn!(status = status.as_u16(), "geocoding provider returned an error status");
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Error::service_unavailable(GEOCODER_UNAVAILABLE)
    } else {
        Error::internal(GEOCODER_FAILED)
    }
}
