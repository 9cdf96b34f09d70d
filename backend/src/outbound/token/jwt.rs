//! HS256 JWT codec implementing [`TokenVerifier`].
//!
//! Tokens carry `{userId, email?, iat, exp}`. The same codec issues tokens
//! for the `mint-token` binary and verifies them for the auth gate.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{AUTHENTICATION_FAILED, TokenVerifier};
use crate::domain::{Error, UserId};

/// Lifetime of issued tokens, in seconds, unless overridden.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Failure to sign a token.
#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Shared-secret token codec.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Codec signing and verifying with `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &UserId, email: Option<&str>) -> Result<String, TokenIssueError> {
        let now = Utc::now();
        let claims = TokenClaims {
            user_id: user.to_string(),
            email: email.map(str::to_owned),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }
}

impl TokenVerifier for JwtTokenCodec {
    fn verify(&self, token: &str) -> Result<UserId, Error> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |err| {
                debug!(error = %err, "bearer token rejected");
                Error::unauthorized(AUTHENTICATION_FAILED)
            },
        )?;
        data.claims.user_id.parse::<UserId>().map_err(|err| {
            debug!(error = %err, "bearer token carries a malformed user id");
            Error::unauthorized(AUTHENTICATION_FAILED)
        })
    }
}
