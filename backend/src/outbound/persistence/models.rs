//! Internal Diesel row structs.
//!
//! These never leave the persistence module; conversions to and from domain
//! types live here so the adapter stays a thin translator.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Coordinates, EmailAddress, ImageRef, Password, Place, PlaceId, UserAccount, UserId,
};
use crate::domain::ports::DocumentStoreError;

use super::schema::{places, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
    pub place_ids: Vec<Uuid>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = DocumentStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|err| {
            DocumentStoreError::query(format!("stored email for user {} is invalid: {err}", row.id))
        })?;
        Ok(Self {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email,
            password: Password::from_stored(row.password),
            image: ImageRef::new(row.image),
            places: row.place_ids.into_iter().map(PlaceId::from_uuid).collect(),
        })
    }
}

/// Row inserted into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub image: &'a str,
    pub place_ids: Vec<Uuid>,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            id: *account.id.as_uuid(),
            name: account.name.as_str(),
            email: account.email.as_ref(),
            password: account.password.expose(),
            image: account.image.as_ref(),
            place_ids: account.places.iter().map(|id| *id.as_uuid()).collect(),
        }
    }
}

/// Row read from or written to `places`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub image: String,
    pub creator_id: Uuid,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: PlaceId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            address: row.address,
            location: Coordinates {
                lat: row.lat,
                lng: row.lng,
            },
            image: ImageRef::new(row.image),
            creator: UserId::from_uuid(row.creator_id),
        }
    }
}

impl From<&Place> for PlaceRow {
    fn from(place: &Place) -> Self {
        Self {
            id: *place.id.as_uuid(),
            title: place.title.clone(),
            description: place.description.clone(),
            address: place.address.clone(),
            lat: place.location.lat,
            lng: place.location.lng,
            image: place.image.to_string(),
            creator_id: *place.creator.as_uuid(),
        }
    }
}

/// Editable columns of `places`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = places)]
pub(crate) struct PlaceEditRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
}
