//! Geocoding outbound adapters.
//!
//! The fixture geocoder lives beside the port; this module holds the HTTP
//! implementation against the Google Geocoding API.

mod dto;
mod google;

pub use google::{DEFAULT_GEOCODING_ENDPOINT, GoogleGeocoder, NO_LOCATION_FOUND};
