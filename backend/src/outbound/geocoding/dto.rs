//! DTOs for decoding Google Geocoding responses.

use serde::Deserialize;

use crate::domain::Coordinates;

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponseDto {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<GeocodeResultDto>,
    #[serde(default)]
    pub(super) error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResultDto {
    pub(super) geometry: GeometryDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeometryDto {
    pub(super) location: LocationDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationDto {
    pub(super) lat: f64,
    pub(super) lng: f64,
}

/// Outcome of a decoded response, before mapping to domain errors.
#[derive(Debug, PartialEq)]
pub(super) enum GeocodeOutcome {
    Found(Coordinates),
    NoMatch,
    Rejected { status: String, detail: Option<String> },
}

impl GeocodeResponseDto {
    pub(super) fn into_outcome(self) -> GeocodeOutcome {
        match self.status.as_str() {
            "OK" => match self.results.into_iter().next() {
                Some(result) => {
                    let LocationDto { lat, lng } = result.geometry.location;
                    GeocodeOutcome::Found(Coordinates { lat, lng })
                }
                None => GeocodeOutcome::NoMatch,
            },
            "ZERO_RESULTS" => GeocodeOutcome::NoMatch,
            _ => GeocodeOutcome::Rejected {
                status: self.status,
                detail: self.error_message,
            },
        }
    }
}
