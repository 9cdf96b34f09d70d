//! Driving port for reading places.

use async_trait::async_trait;

use crate::domain::{Error, Place, PlaceId, UserId};

/// Read-side place use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesQuery: Send + Sync {
    /// Fetch a single place, or a not-found error.
    async fn get_place(&self, id: &PlaceId) -> Result<Place, Error>;

    /// Places owned by `user`, in the order the user's list records them.
    ///
    /// A missing user and a user with no places both yield not-found.
    async fn list_user_places(&self, user: &UserId) -> Result<Vec<Place>, Error>;
}
