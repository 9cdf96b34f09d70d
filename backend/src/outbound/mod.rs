//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: in-process document store, optionally seeded with fixtures
//! - **persistence**: PostgreSQL document store using Diesel
//! - **geocoding**: Google Geocoding API client
//! - **storage**: local directory image store
//! - **token**: HS256 JWT codec
//!
//! Adapters translate between domain types and their infrastructure
//! representation. They contain no business rules.

pub mod geocoding;
pub mod memory;
pub mod persistence;
pub mod storage;
pub mod token;
