//! Place lifecycle service.
//!
//! Implements [`PlacesQuery`] and [`PlacesCommand`] over the document store,
//! geocoder and image store ports. Creation and deletion touch both the place
//! and its owner; those writes always travel in one [`WriteBatch`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreatePlaceRequest, DocumentStore, DocumentStoreError, Geocoder, ImageStore, PlacesCommand,
    PlacesQuery,
};
use crate::domain::{Error, Place, PlaceEdit, PlaceId, UserId, WriteBatch};

pub const PLACE_LOOKUP_FAILED: &str = "Something went wrong, could not find a place.";
pub const PLACE_NOT_FOUND: &str = "Could not find a place for the provided place id.";
pub const USER_PLACES_NOT_FOUND: &str = "Could not find a place for the provided user id.";
pub const PLACES_FETCH_FAILED: &str = "Fetching places failed, please try again later.";
pub const CREATE_FAILED: &str = "Creating place failed, please try again.";
pub const CREATOR_NOT_FOUND: &str = "Could not find user for provided id.";
pub const UPDATE_FORBIDDEN: &str = "You do not have permissions to edit this place.";
pub const UPDATE_FAILED: &str = "Something went wrong, could not update place.";
pub const DELETE_NOT_FOUND: &str = "Could not find place for this id.";
pub const DELETE_FORBIDDEN: &str = "You do not have permissions to delete this place.";
pub const DELETE_FAILED: &str = "Something went wrong, could not delete place.";

/// Place use-cases over injected ports.
///
/// Type parameters may be trait objects, so the server can pick adapters at
/// runtime while tests use concrete mocks.
pub struct PlaceLifecycleService<S: ?Sized, G: ?Sized, I: ?Sized> {
    store: Arc<S>,
    geocoder: Arc<G>,
    images: Arc<I>,
}

impl<S: ?Sized, G: ?Sized, I: ?Sized> Clone for PlaceLifecycleService<S, G, I> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            geocoder: Arc::clone(&self.geocoder),
            images: Arc::clone(&self.images),
        }
    }
}

impl<S: ?Sized, G: ?Sized, I: ?Sized> PlaceLifecycleService<S, G, I> {
    pub fn new(store: Arc<S>, geocoder: Arc<G>, images: Arc<I>) -> Self {
        Self {
            store,
            geocoder,
            images,
        }
    }
}

/// Log the adapter failure and replace it with the fixed client message.
fn store_failure(operation: &'static str, message: &'static str) -> impl Fn(DocumentStoreError) -> Error {
    move |err| {
        error!(operation, error = %err, "document store operation failed");
        Error::internal(message)
    }
}

impl<S, G, I> PlaceLifecycleService<S, G, I>
where
    S: DocumentStore + ?Sized,
    G: Geocoder + ?Sized,
    I: ImageStore + ?Sized,
{
    async fn load_place(
        &self,
        id: &PlaceId,
        operation: &'static str,
        failure: &'static str,
        missing: &'static str,
    ) -> Result<Place, Error> {
        self.store
            .find_place(id)
            .await
            .map_err(store_failure(operation, failure))?
            .ok_or_else(|| Error::not_found(missing))
    }
}

#[async_trait]
impl<S, G, I> PlacesQuery for PlaceLifecycleService<S, G, I>
where
    S: DocumentStore + ?Sized,
    G: Geocoder + ?Sized,
    I: ImageStore + ?Sized,
{
    async fn get_place(&self, id: &PlaceId) -> Result<Place, Error> {
        self.load_place(id, "get_place", PLACE_LOOKUP_FAILED, PLACE_NOT_FOUND)
            .await
    }

    async fn list_user_places(&self, user: &UserId) -> Result<Vec<Place>, Error> {
        let on_failure = store_failure("list_user_places", PLACES_FETCH_FAILED);
        let Some(owner) = self.store.find_user(user).await.map_err(&on_failure)? else {
            return Err(Error::not_found(USER_PLACES_NOT_FOUND));
        };
        let places = self
            .store
            .find_places(&owner.places)
            .await
            .map_err(&on_failure)?;
        if places.is_empty() {
            return Err(Error::not_found(USER_PLACES_NOT_FOUND));
        }
        Ok(places)
    }
}

#[async_trait]
impl<S, G, I> PlacesCommand for PlaceLifecycleService<S, G, I>
where
    S: DocumentStore + ?Sized,
    G: Geocoder + ?Sized,
    I: ImageStore + ?Sized,
{
    async fn create_place(&self, request: CreatePlaceRequest) -> Result<Place, Error> {
        let CreatePlaceRequest {
            creator,
            draft,
            image,
        } = request;

        let location = self.geocoder.resolve(draft.address()).await?;

        let on_failure = store_failure("create_place", CREATE_FAILED);
        if self.store.find_user(&creator).await.map_err(&on_failure)?.is_none() {
            return Err(Error::not_found(CREATOR_NOT_FOUND));
        }

        let place = Place::from_draft(PlaceId::random(), draft, location, image, creator);
        self.store
            .commit(WriteBatch::place_creation(place.clone()))
            .await
            .map_err(&on_failure)?;

        info!(place_id = %place.id, owner_id = %creator, "place created");
        Ok(place)
    }

    async fn update_place(
        &self,
        id: &PlaceId,
        actor: &UserId,
        edit: PlaceEdit,
    ) -> Result<Place, Error> {
        let mut place = self
            .load_place(id, "update_place", UPDATE_FAILED, PLACE_NOT_FOUND)
            .await?;
        if !place.is_owned_by(actor) {
            return Err(Error::forbidden(UPDATE_FORBIDDEN));
        }

        place.apply_edit(edit);
        self.store
            .save_place(&place)
            .await
            .map_err(store_failure("update_place", UPDATE_FAILED))?;
        Ok(place)
    }

    async fn delete_place(&self, id: &PlaceId, actor: &UserId) -> Result<(), Error> {
        let place = self
            .load_place(id, "delete_place", DELETE_FAILED, DELETE_NOT_FOUND)
            .await?;

        let on_failure = store_failure("delete_place", DELETE_FAILED);
        let Some(owner) = self
            .store
            .find_user(&place.creator)
            .await
            .map_err(&on_failure)?
        else {
            error!(place_id = %place.id, owner_id = %place.creator, "place owner missing");
            return Err(Error::internal(DELETE_FAILED));
        };
        if owner.id != *actor {
            return Err(Error::forbidden(DELETE_FORBIDDEN));
        }

        self.store
            .commit(WriteBatch::place_removal(place.id, owner.id))
            .await
            .map_err(&on_failure)?;
        info!(place_id = %place.id, owner_id = %owner.id, "place deleted");

        if let Err(err) = self.images.remove(&place.image).await {
            warn!(place_id = %place.id, image = %place.image, error = %err, "image cleanup failed");
        }
        Ok(())
    }
}
