//! Places API handlers.
//!
//! ```text
//! GET    /api/places/{pid}
//! GET    /api/places/user/{uid}
//! POST   /api/places            multipart: title, description, address, image
//! PATCH  /api/places/{pid}      {"title":"..","description":".."}
//! DELETE /api/places/{pid}
//! ```
//!
//! Write routes require a bearer token (see [`AuthenticatedUser`]).

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::place_service::{
    CREATE_FAILED, DELETE_NOT_FOUND, PLACE_NOT_FOUND, USER_PLACES_NOT_FOUND,
};
use crate::domain::ports::CreatePlaceRequest;
use crate::domain::{Error, ImageRef, Place, PlaceDraft, PlaceEdit, PlaceId, UserId};

use super::ApiResult;
use super::auth::AuthenticatedUser;
use super::schemas::{ErrorSchema, MessageResponse, PlaceSchema};
use super::state::HttpState;
use super::upload::read_place_form;
use super::validation::map_place_validation_error;

/// Acknowledgement returned by `DELETE /api/places/{pid}`.
pub const PLACE_DELETED: &str = "Deleted place";

/// Body of `{place}` responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PlaceResponse {
    #[schema(value_type = PlaceSchema)]
    pub place: Place,
}

/// Body of `{places}` responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PlacesResponse {
    #[schema(value_type = Vec<PlaceSchema>)]
    pub places: Vec<Place>,
}

/// Update request body for `PATCH /api/places/{pid}`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdatePlaceRequest {
    #[schema(example = "Empire State Building")]
    pub title: String,
    #[schema(example = "One of the most famous sky scrapers in the world!")]
    pub description: String,
}

/// Multipart form accepted by `POST /api/places`, for documentation only.
#[derive(utoipa::ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreatePlaceForm {
    title: String,
    description: String,
    address: String,
    /// PNG or JPEG, at most 500 000 bytes.
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

fn parse_place_id(raw: &str, missing: &'static str) -> Result<PlaceId, Error> {
    raw.parse().map_err(|_| Error::not_found(missing))
}

/// Fetch one place.
#[utoipa::path(
    get,
    path = "/api/places/{pid}",
    params(("pid" = String, Path, description = "Place id")),
    responses(
        (status = 200, description = "Place", body = PlaceResponse),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "getPlace",
    security([])
)]
#[get("/places/{pid}")]
pub async fn get_place(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlaceResponse>> {
    let id = parse_place_id(&path, PLACE_NOT_FOUND)?;
    let place = state.places.get_place(&id).await?;
    Ok(web::Json(PlaceResponse { place }))
}

/// List places owned by a user, in the order they were created.
#[utoipa::path(
    get,
    path = "/api/places/user/{uid}",
    params(("uid" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Places", body = PlacesResponse),
        (status = 404, description = "Unknown user or no places", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "listUserPlaces",
    security([])
)]
#[get("/places/user/{uid}")]
pub async fn list_user_places(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PlacesResponse>> {
    let user: UserId = path
        .parse()
        .map_err(|_| Error::not_found(USER_PLACES_NOT_FOUND))?;
    let places = state.places.list_user_places(&user).await?;
    Ok(web::Json(PlacesResponse { places }))
}

async fn discard_image(state: &HttpState, image: &ImageRef) {
    if let Err(err) = state.images.remove(image).await {
        warn!(image = %image, error = %err, "failed to discard image of rejected place");
    }
}

/// Create a place owned by the caller.
///
/// The image is stored first; if creation then fails it is removed again.
#[utoipa::path(
    post,
    path = "/api/places",
    request_body(content = CreatePlaceForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = PlaceResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "Caller's account no longer exists", body = ErrorSchema),
        (status = 422, description = "Invalid inputs or unknown address", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema),
        (status = 503, description = "Geocoder unavailable", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "createPlace"
)]
#[post("/places")]
pub async fn create_place(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let form = read_place_form(payload).await?;
    let draft = PlaceDraft::try_from_parts(&form.title, &form.description, &form.address)
        .map_err(map_place_validation_error)?;
    let image = state.images.store(&form.image).await.map_err(|err| {
        error!(error = %err, "storing uploaded image failed");
        Error::internal(CREATE_FAILED)
    })?;

    let request = CreatePlaceRequest {
        creator: *caller.user_id(),
        draft,
        image: image.clone(),
    };
    match state.places_command.create_place(request).await {
        Ok(place) => Ok(HttpResponse::Created().json(PlaceResponse { place })),
        Err(err) => {
            discard_image(&state, &image).await;
            Err(err)
        }
    }
}

/// Edit the title and description of a place the caller owns.
#[utoipa::path(
    patch,
    path = "/api/places/{pid}",
    params(("pid" = String, Path, description = "Place id")),
    request_body = UpdatePlaceRequest,
    responses(
        (status = 200, description = "Updated", body = PlaceResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 422, description = "Invalid inputs", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "updatePlace"
)]
#[patch("/places/{pid}")]
pub async fn update_place(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdatePlaceRequest>,
) -> ApiResult<web::Json<PlaceResponse>> {
    let UpdatePlaceRequest { title, description } = payload.into_inner();
    let edit =
        PlaceEdit::try_from_parts(&title, &description).map_err(map_place_validation_error)?;
    let id = parse_place_id(&path, PLACE_NOT_FOUND)?;
    let place = state
        .places_command
        .update_place(&id, caller.user_id(), edit)
        .await?;
    Ok(web::Json(PlaceResponse { place }))
}

/// Delete a place the caller owns.
#[utoipa::path(
    delete,
    path = "/api/places/{pid}",
    params(("pid" = String, Path, description = "Place id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Missing token or not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown place", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "deletePlace"
)]
#[delete("/places/{pid}")]
pub async fn delete_place(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_place_id(&path, DELETE_NOT_FOUND)?;
    state
        .places_command
        .delete_place(&id, caller.user_id())
        .await?;
    Ok(web::Json(MessageResponse::new(PLACE_DELETED)))
}

#[cfg(test)]
#[path = "places_tests.rs"]
mod tests;
