//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Message returned when the email already belongs to an account.
pub const DUPLICATE_EMAIL: &str = "Could not create user, a user with this email already exists.";

/// Account creation use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account with no places. Fails with an invalid-request error
    /// when the email is taken.
    async fn signup(&self, details: SignupDetails) -> Result<User, Error>;
}
