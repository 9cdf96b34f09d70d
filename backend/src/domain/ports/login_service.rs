//! Driving port for credential checks.
//!
//! Inbound adapters call this port without knowing which store backs it, so
//! handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Message returned for an unknown email or a wrong password alike.
pub const INVALID_CREDENTIALS: &str = "Could not identify user, incorrect credentials";

/// Login use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the matching user id, or an unauthorised error that does not
    /// reveal which part was wrong.
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
