//! User accounts and the public profile projection.
//!
//! [`UserAccount`] is the stored record, password included. Everything that
//! leaves the service goes through [`User`], which has no password field.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{ImageRef, PlaceId};

/// Image assigned to users who sign up without one.
pub const PLACEHOLDER_USER_IMAGE: &str = "https://www.gravatar.com/avatar/?d=mp";

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN: usize = 6;

/// Validation errors raised while building signup details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail,
    PasswordTooShort { min: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an address.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account password.
///
/// Stored and compared as supplied; the buffer is wiped on drop. Debug output
/// never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a stored password without applying signup rules.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Validate a password chosen at signup.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self::from_stored(raw))
    }

    /// Whether `candidate` is the password held here.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }

    /// Raw value for persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated input for creating an account.
///
/// # Examples
/// ```
/// use places_backend::domain::SignupDetails;
///
/// let details = SignupDetails::try_from_parts("Ada", "ada@example.com", "secret", None)
///     .expect("valid signup");
/// assert_eq!(details.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: String,
    email: EmailAddress,
    password: Password,
    image: Option<ImageRef>,
}

impl SignupDetails {
    /// Validate raw signup fields. Name is checked before email, email
    /// before password.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        image: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;
        let image = image
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ImageRef::new);
        Ok(Self {
            name: name.to_owned(),
            email,
            password,
            image,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Turn the details into a stored account with no places.
    pub fn into_account(self, id: UserId) -> UserAccount {
        UserAccount {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            image: self
                .image
                .unwrap_or_else(|| ImageRef::new(PLACEHOLDER_USER_IMAGE)),
            places: Vec::new(),
        }
    }
}

/// Credentials presented at login. Not validated: anything that fails to
/// match is simply an unknown login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Stored user record.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password: Password,
    pub image: ImageRef,
    /// Owned place ids in insertion order.
    pub places: Vec<PlaceId>,
}

impl UserAccount {
    /// Public view of the account.
    pub fn profile(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            places: self.places.clone(),
        }
    }

    /// Append `place` unless it is already listed.
    pub fn attach_place(&mut self, place: PlaceId) {
        if !self.places.contains(&place) {
            self.places.push(place);
        }
    }

    /// Remove `place` from the list, returning whether it was present.
    pub fn detach_place(&mut self, place: &PlaceId) -> bool {
        let before = self.places.len();
        self.places.retain(|candidate| candidate != place);
        self.places.len() != before
    }
}

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub image: ImageRef,
    pub places: Vec<PlaceId>,
}
