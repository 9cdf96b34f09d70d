//! Multipart decoding for the place creation form.
//!
//! The form carries text fields `title`, `description`, `address` and one
//! file field `image`. The image is buffered up to [`MAX_IMAGE_BYTES`] and
//! rejected as soon as it grows past that; text fields have their own small
//! cap. Unknown fields are drained and ignored.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::TryStreamExt;
use tracing::debug;

use crate::domain::{Error, ImageUpload, ImageValidationError, MAX_IMAGE_BYTES};

use super::validation::{
    ADDRESS, DESCRIPTION, FieldName, IMAGE, TITLE, ValidationCode, field_error_with_limit,
    malformed_field_error, map_image_validation_error, missing_field_error,
};

/// Largest accepted text field, in bytes.
pub const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// Raw place form as received, before domain validation.
#[derive(Debug)]
pub struct PlaceForm {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: ImageUpload,
}

fn map_multipart_error(err: MultipartError) -> Error {
    debug!(error = %err, "multipart body could not be read");
    malformed_field_error(IMAGE)
}

async fn read_limited(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf))
}

async fn read_text(field: &mut Field, name: FieldName) -> Result<String, Error> {
    let bytes = read_limited(field, MAX_TEXT_FIELD_BYTES)
        .await?
        .ok_or_else(|| {
            field_error_with_limit(name, ValidationCode::TooLarge, MAX_TEXT_FIELD_BYTES)
        })?;
    String::from_utf8(bytes).map_err(|_| malformed_field_error(name))
}

async fn read_image(field: &mut Field) -> Result<ImageUpload, Error> {
    let mime = field
        .content_type()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_default();
    let bytes = read_limited(field, MAX_IMAGE_BYTES).await?.ok_or_else(|| {
        map_image_validation_error(ImageValidationError::TooLarge {
            max: MAX_IMAGE_BYTES,
        })
    })?;
    ImageUpload::try_new(&mime, bytes).map_err(map_image_validation_error)
}

/// Drain `payload` into a [`PlaceForm`].
///
/// # Errors
///
/// Returns a 422 validation error naming the first missing, oversized or
/// unreadable field.
pub async fn read_place_form(mut payload: Multipart) -> Result<PlaceForm, Error> {
    let mut title = None;
    let mut description = None;
    let mut address = None;
    let mut image = None;

    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("title") => title = Some(read_text(&mut field, TITLE).await?),
            Some("description") => description = Some(read_text(&mut field, DESCRIPTION).await?),
            Some("address") => address = Some(read_text(&mut field, ADDRESS).await?),
            Some("image") => image = Some(read_image(&mut field).await?),
            other => {
                debug!(field = other.unwrap_or(""), "ignoring unknown form field");
                while field.try_next().await.map_err(map_multipart_error)?.is_some() {}
            }
        }
    }

    Ok(PlaceForm {
        title: title.ok_or_else(|| missing_field_error(TITLE))?,
        description: description.ok_or_else(|| missing_field_error(DESCRIPTION))?,
        address: address.ok_or_else(|| missing_field_error(ADDRESS))?,
        image: image.ok_or_else(|| missing_field_error(IMAGE))?,
    })
}
