//! Driving port for place mutations.
//!
//! Every operation takes the authenticated user explicitly; inbound adapters
//! obtain it from the bearer token and never from the request body.

use async_trait::async_trait;

use crate::domain::{Error, ImageRef, Place, PlaceDraft, PlaceEdit, PlaceId, UserId};

/// Input for [`PlacesCommand::create_place`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlaceRequest {
    pub creator: UserId,
    pub draft: PlaceDraft,
    /// Image already written by the upload layer.
    pub image: ImageRef,
}

/// Write-side place use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesCommand: Send + Sync {
    /// Geocode, bind to the creator and insert the place together with the
    /// creator's back-reference.
    async fn create_place(&self, request: CreatePlaceRequest) -> Result<Place, Error>;

    /// Replace title and description. Only the creator may do this.
    async fn update_place(
        &self,
        id: &PlaceId,
        actor: &UserId,
        edit: PlaceEdit,
    ) -> Result<Place, Error>;

    /// Remove the place and the creator's back-reference. Only the creator
    /// may do this.
    async fn delete_place(&self, id: &PlaceId, actor: &UserId) -> Result<(), Error>;
}
