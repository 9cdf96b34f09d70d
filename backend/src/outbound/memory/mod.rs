//! In-process adapters used for development and tests.

mod document_store;
mod fixtures;

pub use document_store::MemoryDocumentStore;
pub use fixtures::{FIXTURE_PLACE_ID, FIXTURE_USER_ID, fixture_place, fixture_user};
