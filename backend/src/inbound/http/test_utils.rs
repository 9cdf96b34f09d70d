//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    MockImageStore, MockLoginService, MockPlacesCommand, MockPlacesQuery, MockSignupService,
    MockTokenVerifier, MockUsersQuery,
};

use super::state::{HttpState, HttpStatePorts};

/// One mock per port; set expectations, then hand to [`state_with`].
#[derive(Default)]
pub struct TestPorts {
    pub places: MockPlacesQuery,
    pub places_command: MockPlacesCommand,
    pub users: MockUsersQuery,
    pub signup: MockSignupService,
    pub login: MockLoginService,
    pub tokens: MockTokenVerifier,
    pub images: MockImageStore,
}

/// Wrap the mocks as handler state.
pub fn state_with(ports: TestPorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(HttpStatePorts {
        places: Arc::new(ports.places),
        places_command: Arc::new(ports.places_command),
        users: Arc::new(ports.users),
        signup: Arc::new(ports.signup),
        login: Arc::new(ports.login),
        tokens: Arc::new(ports.tokens),
        images: Arc::new(ports.images),
    }))
}

/// Boundary used by [`MultipartBody`].
pub const BOUNDARY: &str = "places-test-boundary";

/// Hand-rolled `multipart/form-data` body for handler tests.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, mime: &str, content: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"upload\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(content);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// `(content-type header, body)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.bytes,
        )
    }
}
