//! Driven port over the place and user documents.
//!
//! Services reach storage only through [`DocumentStore`]. Single-document
//! reads and writes are plain calls; anything that touches a place and its
//! owner together goes through [`DocumentStore::commit`] so both writes land
//! or neither does.

use async_trait::async_trait;

use crate::domain::{Place, PlaceId, UserAccount, UserId, WriteBatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "document store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "document store query failed: {message}",
        /// A unique key such as a user email already exists.
        DuplicateKey { message: String } => "document store rejected duplicate key: {message}",
        /// A write targeted a document that does not exist.
        MissingDocument { message: String } => "document store write target missing: {message}",
        /// A batch was rolled back before commit.
        Aborted { message: String } => "document store transaction aborted: {message}",
    }
}

/// Persistence boundary for places and users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a place by id.
    async fn find_place(&self, id: &PlaceId) -> Result<Option<Place>, DocumentStoreError>;

    /// Fetch the places with the given ids, in the order given. Ids with no
    /// matching document are skipped.
    async fn find_places(&self, ids: &[PlaceId]) -> Result<Vec<Place>, DocumentStoreError>;

    /// Fetch a user by id.
    async fn find_user(&self, id: &UserId) -> Result<Option<UserAccount>, DocumentStoreError>;

    /// Fetch a user by exact email.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, DocumentStoreError>;

    /// All users in creation order.
    async fn list_users(&self) -> Result<Vec<UserAccount>, DocumentStoreError>;

    /// Persist the editable fields (title, description) of an existing
    /// place.
    ///
    /// Fails with [`DocumentStoreError::MissingDocument`] when the place is
    /// gone.
    async fn save_place(&self, place: &Place) -> Result<(), DocumentStoreError>;

    /// Insert a new user.
    ///
    /// Fails with [`DocumentStoreError::DuplicateKey`] when the email is taken.
    async fn insert_user(&self, user: &UserAccount) -> Result<(), DocumentStoreError>;

    /// Apply every write in `batch` atomically.
    async fn commit(&self, batch: WriteBatch) -> Result<(), DocumentStoreError>;
}
