//! Places backend library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the model, services
//! and ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports for memory, PostgreSQL, Google geocoding,
//! local image storage and JWT verification.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
