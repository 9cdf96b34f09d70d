//! Driven port verifying bearer tokens.

use crate::domain::{Error, UserId};

/// Message returned for every authentication failure.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed.";

/// Verifies a bearer token and yields the user it was issued to.
///
/// Verification is a pure function of the token and the adapter's key
/// material, so the port is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Return the token's user id, or an unauthorised error when the
    /// signature, expiry or payload is wrong.
    fn verify(&self, token: &str) -> Result<UserId, Error>;
}
