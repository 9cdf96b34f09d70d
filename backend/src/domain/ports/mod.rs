//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`PlacesQuery`, `PlacesCommand`, `UsersQuery`,
//! `SignupService`, `LoginService`) are called by inbound adapters. Driven
//! ports (`DocumentStore`, `Geocoder`, `ImageStore`, `TokenVerifier`) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod document_store;
mod geocoder;
mod image_store;
mod login_service;
mod places_command;
mod places_query;
mod signup_service;
mod token_verifier;
mod users_query;

#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, DocumentStoreError};
#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{FIXTURE_LAT, FIXTURE_LNG, FixtureGeocoder, Geocoder};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use places_command::MockPlacesCommand;
pub use places_command::{CreatePlaceRequest, PlacesCommand};
#[cfg(test)]
pub use places_query::MockPlacesQuery;
pub use places_query::PlacesQuery;
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::{DUPLICATE_EMAIL, SignupService};
#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
pub use token_verifier::{AUTHENTICATION_FAILED, TokenVerifier};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
