//! Bearer token gate for protected routes.
//!
//! Handlers that take an [`AuthenticatedUser`] only run once the
//! `Authorization: Bearer <token>` header has been verified. Missing,
//! malformed and rejected tokens all produce the same 401.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::ports::AUTHENTICATION_FAILED;
use crate::domain::{Error, UserId};

use super::state::HttpState;

const BEARER: &str = "Bearer ";

/// Identity of the caller, proven by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// The verified user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER)?.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data; auth gate cannot verify tokens");
        return Err(Error::internal("Something went wrong, please try again later."));
    };
    let token = bearer_token(req).ok_or_else(|| Error::unauthorized(AUTHENTICATION_FAILED))?;
    state.tokens.verify(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
