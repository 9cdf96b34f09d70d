//! PostgreSQL persistence adapters using Diesel.
//!
//! Connections come from a `bb8` pool of `diesel-async` connections. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module; the adapter only translates between them and domain types.
//!
//! # Example
//!
//! ```rust,no_run
//! use places_backend::outbound::persistence::{
//!     DbPool, DieselDocumentStore, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/places";
//! run_pending_migrations(url).await?;
//! let store = DieselDocumentStore::new(DbPool::new(PoolConfig::new(url)).await?);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_document_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_store::DieselDocumentStore;
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
