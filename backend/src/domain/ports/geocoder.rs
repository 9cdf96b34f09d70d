//! Driven port resolving postal addresses to coordinates.

use async_trait::async_trait;

use crate::domain::{Coordinates, Error};

/// Latitude of the fixture location (Empire State Building).
pub const FIXTURE_LAT: f64 = 40.7484474;
/// Longitude of the fixture location (Empire State Building).
pub const FIXTURE_LNG: f64 = -73.9871516;

/// Resolves an address to a location.
///
/// Adapters decide the error category themselves: an address with no match
/// is an invalid request, an unreachable provider is unavailable. Services
/// return these errors unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinates, Error>;
}

/// Geocoder that places every address at the same fixed point.
///
/// Used when no provider key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGeocoder;

#[async_trait]
impl Geocoder for FixtureGeocoder {
    async fn resolve(&self, _address: &str) -> Result<Coordinates, Error> {
        Ok(Coordinates {
            lat: FIXTURE_LAT,
            lng: FIXTURE_LNG,
        })
    }
}
