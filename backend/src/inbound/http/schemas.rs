//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the target resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A collaborating service could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Could not find a place for the provided place id.")]
    message: String,
    /// Correlation identifier, mirrored in the `trace-id` header.
    #[schema(example = "6f1c1e8e-2f52-4a7c-9a4e-0d3d1b6c7a10")]
    trace_id: Option<String>,
    /// Offending field and validation code for 422 responses.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Coordinates`].
#[derive(ToSchema)]
#[schema(as = Coordinates)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CoordinatesSchema {
    #[schema(example = 40.7484474)]
    lat: f64,
    #[schema(example = -73.9871516)]
    lng: f64,
}

/// OpenAPI schema for [`crate::domain::Place`].
#[derive(ToSchema)]
#[schema(as = Place)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PlaceSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Empire State Building")]
    title: String,
    description: String,
    #[schema(example = "20 W 34th St, New York, NY 10001")]
    address: String,
    location: CoordinatesSchema,
    /// Relative path of the stored image.
    #[schema(example = "uploads/images/0b5c8a52-3d3c-4c1b-9d7f-0c3c3a0c8d11.png")]
    image: String,
    /// Id of the owning user.
    #[schema(value_type = String, format = Uuid)]
    creator: String,
}

/// OpenAPI schema for [`crate::domain::User`]. Passwords are never
/// serialised.
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    #[schema(example = "Carter Moore")]
    name: String,
    #[schema(example = "test@test.com")]
    email: String,
    image: String,
    /// Ids of places owned by the user, oldest first.
    #[schema(value_type = Vec<String>)]
    places: Vec<String>,
}

/// `{message}` acknowledgement body.
#[derive(serde::Serialize, serde::Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Deleted place")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> serde_json::Value {
        serde_json::to_value(T::schema()).expect("schema serialises")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let schema = schema_json::<ErrorCodeSchema>();
        let values = schema["enum"].as_array().expect("enum values");
        assert_eq!(values.len(), 6);
        assert!(values.iter().any(|v| v == "service_unavailable"));
    }

    #[rstest]
    fn user_schema_has_no_password() {
        let schema = schema_json::<UserSchema>();
        let properties = schema["properties"].as_object().expect("properties");
        assert!(properties.contains_key("places"));
        assert!(!properties.contains_key("password"));
    }

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        let schema = schema_json::<ErrorSchema>();
        assert!(schema["properties"].get("traceId").is_some());
    }
}
