//! Shared harness for HTTP integration tests.
//!
//! Builds the full Actix app over the in-memory store, a temporary upload
//! directory and a scripted geocoder, and mints bearer tokens with the same
//! codec the app verifies with.

#![allow(dead_code, reason = "each test binary uses a subset of the harness")]

use std::path::Path;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;

use places_backend::Trace;
use places_backend::domain::ports::{FIXTURE_LAT, FIXTURE_LNG, Geocoder};
use places_backend::domain::{Coordinates, Error, PlaceLifecycleService, UserAccountService, UserId};
use places_backend::inbound::http::configure_api;
use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
use places_backend::outbound::geocoding::NO_LOCATION_FOUND;
use places_backend::outbound::memory::MemoryDocumentStore;
use places_backend::outbound::storage::LocalImageStore;
use places_backend::outbound::token::JwtTokenCodec;

pub const SECRET: &str = "integration-secret";
pub const UNKNOWN_ADDRESS: &str = "Nowhere at all";
pub const EMPIRE_STATE_ADDRESS: &str = "20 W 34th St, New York, NY 10001";
const BOUNDARY: &str = "places-integration-boundary";

/// Geocoder that knows every address except [`UNKNOWN_ADDRESS`].
pub struct ScriptedGeocoder;

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, Error> {
        if address == UNKNOWN_ADDRESS {
            Err(Error::invalid_request(NO_LOCATION_FOUND))
        } else {
            Ok(Coordinates {
                lat: FIXTURE_LAT,
                lng: FIXTURE_LNG,
            })
        }
    }
}

/// Everything a test needs to drive and inspect the app.
pub struct Harness {
    pub store: Arc<MemoryDocumentStore>,
    pub state: web::Data<HttpState>,
    pub codec: JwtTokenCodec,
    pub upload_root: TempDir,
}

impl Harness {
    pub fn new(store: MemoryDocumentStore) -> Self {
        let upload_root = tempfile::tempdir().expect("temp upload dir");
        let upload_dir = upload_root
            .path()
            .join("images")
            .to_string_lossy()
            .into_owned();
        let store = Arc::new(store);
        let images = Arc::new(LocalImageStore::new(upload_dir));
        let places = Arc::new(PlaceLifecycleService::new(
            Arc::clone(&store),
            Arc::new(ScriptedGeocoder),
            Arc::clone(&images),
        ));
        let accounts = Arc::new(UserAccountService::new(Arc::clone(&store)));
        let state = web::Data::new(HttpState::new(HttpStatePorts {
            places: places.clone(),
            places_command: places,
            users: accounts.clone(),
            signup: accounts.clone(),
            login: accounts,
            tokens: Arc::new(JwtTokenCodec::new(SECRET)),
            images,
        }));
        Self {
            store,
            state,
            codec: JwtTokenCodec::new(SECRET),
            upload_root,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(Trace)
            .service(web::scope("/api").configure(configure_api))
    }

    pub fn bearer(&self, user: &UserId) -> (actix_web::http::header::HeaderName, String) {
        let token = self.codec.issue(user, None).expect("token");
        (AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Files currently in the upload directory.
    pub fn stored_images(&self) -> Vec<String> {
        list_files(&self.upload_root.path().join("images"))
    }
}

fn list_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Call the app and decode the JSON body.
pub async fn call<S, B>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

/// `multipart/form-data` place form.
pub fn place_form(
    title: &str,
    description: &str,
    address: &str,
    image: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in [
        ("title", title),
        ("description", description),
        ("address", address),
    ] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((mime, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// `POST /api/places` with a PNG image.
pub fn create_place_request(
    harness: &Harness,
    caller: &UserId,
    title: &str,
    address: &str,
) -> test::TestRequest {
    let (content_type, body) = place_form(
        title,
        "A place worth sharing with everyone.",
        address,
        Some(("image/png", b"\x89PNG fake image bytes")),
    );
    test::TestRequest::post()
        .uri("/api/places")
        .insert_header((CONTENT_TYPE, content_type))
        .insert_header(harness.bearer(caller))
        .set_payload(body)
}

/// `POST /api/users/signup`, returning the new user's id.
pub async fn sign_up<S, B>(app: &S, name: &str, email: &str) -> UserId
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/users/signup")
        .set_json(serde_json::json!({
            "name": name,
            "email": email,
            "password": "testers",
        }));
    let (status, body) = call(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body["user"]["id"]
        .as_str()
        .expect("user id")
        .parse()
        .expect("uuid user id")
}

/// Drop the per-request trace id so bodies can be compared.
pub fn without_trace_id(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.remove("traceId");
    }
    body
}
