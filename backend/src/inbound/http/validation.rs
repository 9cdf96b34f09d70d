//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every input failure reports the same client message; the offending field
//! and a stable code travel in `details`.

use serde_json::json;

use crate::domain::{Error, ImageValidationError, PlaceValidationError, UserValidationError};

/// Message returned for every rejected input.
pub const INVALID_INPUTS: &str = "Invalid inputs passed, please check your data.";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    Empty,
    TooShort,
    InvalidEmail,
    UnsupportedType,
    TooLarge,
    Malformed,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::InvalidEmail => "invalid_email",
            Self::UnsupportedType => "unsupported_type",
            Self::TooLarge => "too_large",
            Self::Malformed => "malformed",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const ADDRESS: FieldName = FieldName::new("address");
pub(crate) const IMAGE: FieldName = FieldName::new("image");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const BODY: FieldName = FieldName::new("body");

pub(crate) fn field_error(field: FieldName, code: ValidationCode) -> Error {
    Error::invalid_request(INVALID_INPUTS).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn field_error_with_limit(field: FieldName, code: ValidationCode, limit: usize) -> Error {
    Error::invalid_request(INVALID_INPUTS).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "limit": limit,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(field, ValidationCode::MissingField)
}

pub(crate) fn map_place_validation_error(err: PlaceValidationError) -> Error {
    match err {
        PlaceValidationError::EmptyTitle => field_error(TITLE, ValidationCode::Empty),
        PlaceValidationError::DescriptionTooShort { min } => {
            field_error_with_limit(DESCRIPTION, ValidationCode::TooShort, min)
        }
        PlaceValidationError::EmptyAddress => field_error(ADDRESS, ValidationCode::Empty),
    }
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => field_error(NAME, ValidationCode::Empty),
        UserValidationError::InvalidEmail => field_error(EMAIL, ValidationCode::InvalidEmail),
        UserValidationError::PasswordTooShort { min } => {
            field_error_with_limit(PASSWORD, ValidationCode::TooShort, min)
        }
    }
}

pub(crate) fn map_image_validation_error(err: ImageValidationError) -> Error {
    match err {
        ImageValidationError::UnsupportedType => {
            field_error(IMAGE, ValidationCode::UnsupportedType)
        }
        ImageValidationError::Empty => field_error(IMAGE, ValidationCode::Empty),
        ImageValidationError::TooLarge { max } => {
            field_error_with_limit(IMAGE, ValidationCode::TooLarge, max)
        }
    }
}

pub(crate) fn malformed_field_error(field: FieldName) -> Error {
    field_error(field, ValidationCode::Malformed)
}

/// Request body could not be decoded at all.
pub(crate) fn invalid_body_error() -> Error {
    field_error(BODY, ValidationCode::Malformed)
}
