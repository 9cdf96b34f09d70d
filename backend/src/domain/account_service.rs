//! User account service implementing the user-facing driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    DUPLICATE_EMAIL, DocumentStore, DocumentStoreError, INVALID_CREDENTIALS, LoginService,
    SignupService, UsersQuery,
};
use crate::domain::{Error, LoginCredentials, SignupDetails, User, UserId};

pub const USERS_FETCH_FAILED: &str = "Fetching users failed, please try again later.";
pub const SIGNUP_FAILED: &str = "Signing up failed, please try again later.";
pub const LOGIN_FAILED: &str = "Logging in failed, please try again later.";

/// Signup, login and listing over the document store.
pub struct UserAccountService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for UserAccountService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> UserAccountService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn map_store_error(operation: &'static str, message: &'static str, err: DocumentStoreError) -> Error {
    error!(operation, error = %err, "document store operation failed");
    Error::internal(message)
}

#[async_trait]
impl<S> UsersQuery for UserAccountService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let accounts = self
            .store
            .list_users()
            .await
            .map_err(|err| map_store_error("list_users", USERS_FETCH_FAILED, err))?;
        Ok(accounts.iter().map(|account| account.profile()).collect())
    }
}

#[async_trait]
impl<S> SignupService for UserAccountService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        let existing = self
            .store
            .find_user_by_email(details.email().as_ref())
            .await
            .map_err(|err| map_store_error("signup", SIGNUP_FAILED, err))?;
        if existing.is_some() {
            return Err(Error::invalid_request(DUPLICATE_EMAIL));
        }

        let account = details.into_account(UserId::random());
        match self.store.insert_user(&account).await {
            Ok(()) => {}
            // A concurrent signup won the race for this email.
            Err(DocumentStoreError::DuplicateKey { .. }) => {
                return Err(Error::invalid_request(DUPLICATE_EMAIL));
            }
            Err(err) => return Err(map_store_error("signup", SIGNUP_FAILED, err)),
        }

        info!(user_id = %account.id, "user signed up");
        Ok(account.profile())
    }
}

#[async_trait]
impl<S> LoginService for UserAccountService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .store
            .find_user_by_email(credentials.email())
            .await
            .map_err(|err| map_store_error("login", LOGIN_FAILED, err))?;
        match account {
            Some(account) if account.password.matches(credentials.password()) => Ok(account.id),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockDocumentStore;
    use crate::domain::UserAccount;
    use rstest::rstest;

    fn carter() -> UserAccount {
        SignupDetails::try_from_parts("Carter Moore", "test@test.com", "testers", None)
            .expect("valid signup")
            .into_account(UserId::random())
    }

    fn details() -> SignupDetails {
        SignupDetails::try_from_parts("Ada", "ada@example.com", "secret", None).expect("valid")
    }

    #[rstest]
    #[tokio::test]
    async fn list_users_returns_profiles() {
        let mut store = MockDocumentStore::new();
        store.expect_list_users().returning(|| Ok(vec![carter()]));
        let users = UserAccountService::new(Arc::new(store))
            .list_users()
            .await
            .expect("users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Carter Moore");
    }

    #[rstest]
    #[tokio::test]
    async fn signup_rejects_existing_email() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_user_by_email()
            .returning(|_| Ok(Some(carter())));
        store.expect_insert_user().never();
        let err = UserAccountService::new(Arc::new(store))
            .signup(details())
            .await
            .expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), DUPLICATE_EMAIL);
    }

    #[rstest]
    #[case::duplicate_race(DocumentStoreError::duplicate_key("users_email_key"), ErrorCode::InvalidRequest, DUPLICATE_EMAIL)]
    #[case::store_down(DocumentStoreError::connection("refused"), ErrorCode::InternalError, SIGNUP_FAILED)]
    #[tokio::test]
    async fn signup_maps_insert_failures(
        #[case] failure: DocumentStoreError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mut store = MockDocumentStore::new();
        store.expect_find_user_by_email().returning(|_| Ok(None));
        store
            .expect_insert_user()
            .return_once(move |_| Err(failure));
        let err = UserAccountService::new(Arc::new(store))
            .signup(details())
            .await
            .expect_err("insert failure");
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn signup_creates_account_without_places() {
        let mut store = MockDocumentStore::new();
        store.expect_find_user_by_email().returning(|_| Ok(None));
        store
            .expect_insert_user()
            .withf(|account| account.places.is_empty() && account.password.matches("secret"))
            .times(1)
            .returning(|_| Ok(()));
        let user = UserAccountService::new(Arc::new(store))
            .signup(details())
            .await
            .expect("signup");
        assert_eq!(user.email.as_ref(), "ada@example.com");
        assert!(user.places.is_empty());
    }

    #[rstest]
    #[case::wrong_password(true, "nope")]
    #[case::unknown_email(false, "testers")]
    #[tokio::test]
    async fn login_failures_are_indistinguishable(#[case] known: bool, #[case] password: &str) {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_user_by_email()
            .returning(move |_| Ok(known.then(carter)));
        let err = UserAccountService::new(Arc::new(store))
            .login(&LoginCredentials::new("test@test.com", password))
            .await
            .expect_err("bad credentials");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn login_returns_user_id() {
        let account = carter();
        let expected = account.id;
        let mut store = MockDocumentStore::new();
        store
            .expect_find_user_by_email()
            .withf(|email| email == "test@test.com")
            .returning(move |_| Ok(Some(account.clone())));
        let id = UserAccountService::new(Arc::new(store))
            .login(&LoginCredentials::new("test@test.com", "testers"))
            .await
            .expect("login");
        assert_eq!(id, expected);
    }
}
