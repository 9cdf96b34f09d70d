//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the bearer security scheme that
//! guards place writes. The document backs Swagger UI in debug builds and is
//! exported by the `openapi-dump` binary.

use crate::inbound::http::places::{
    CreatePlaceForm, PlaceResponse, PlacesResponse, UpdatePlaceRequest,
};
use crate::inbound::http::schemas::{
    CoordinatesSchema, ErrorCodeSchema, ErrorSchema, MessageResponse, PlaceSchema, UserSchema,
};
use crate::inbound::http::users::{LoginRequest, SignupRequest, UserResponse, UsersResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("HS256 token carrying the caller's userId."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Places backend API",
        description = "Share places with a title, description, geocoded address and photo."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::places::get_place,
        crate::inbound::http::places::list_user_places,
        crate::inbound::http::places::create_place,
        crate::inbound::http::places::update_place,
        crate::inbound::http::places::delete_place,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CoordinatesSchema,
        PlaceSchema,
        UserSchema,
        MessageResponse,
        PlaceResponse,
        PlacesResponse,
        CreatePlaceForm,
        UpdatePlaceRequest,
        UserResponse,
        UsersResponse,
        SignupRequest,
        LoginRequest,
    )),
    tags(
        (name = "places", description = "Place lifecycle"),
        (name = "users", description = "Accounts and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case::error("Error", &["code", "message", "traceId", "details"])]
    #[case::place("Place", &["id", "title", "location", "image", "creator"])]
    #[case::user("User", &["id", "name", "email", "image", "places"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);
        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }

    #[rstest]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/places/{pid}",
            "/api/places/user/{uid}",
            "/api/places",
            "/api/users",
            "/api/users/signup",
            "/api/users/login",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
