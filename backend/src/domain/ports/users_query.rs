//! Driving port for listing users.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read-side user use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user, without passwords.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
