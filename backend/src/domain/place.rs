//! Place records and the validated inputs used to create and edit them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ImageRef, UserId};

/// Minimum description length for create and update.
pub const DESCRIPTION_MIN: usize = 5;

/// Validation errors raised while building place inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceValidationError {
    EmptyTitle,
    DescriptionTooShort { min: usize },
    EmptyAddress,
}

impl fmt::Display for PlaceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::DescriptionTooShort { min } => {
                write!(f, "description must be at least {min} characters")
            }
            Self::EmptyAddress => write!(f, "address must not be empty"),
        }
    }
}

impl std::error::Error for PlaceValidationError {}

/// Stable place identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(Uuid);

impl PlaceId {
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

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PlaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

fn validate_title(title: &str) -> Result<String, PlaceValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PlaceValidationError::EmptyTitle);
    }
    Ok(title.to_owned())
}

fn validate_description(description: &str) -> Result<String, PlaceValidationError> {
    let description = description.trim();
    if description.chars().count() < DESCRIPTION_MIN {
        return Err(PlaceValidationError::DescriptionTooShort {
            min: DESCRIPTION_MIN,
        });
    }
    Ok(description.to_owned())
}

/// Validated fields for a new place, before geocoding.
///
/// # Examples
/// ```
/// use places_backend::domain::PlaceDraft;
///
/// let draft = PlaceDraft::try_from_parts(
///     "Empire State Building",
///     "One of the most famous sky scrapers in the world!",
///     "20 W 34th St, New York, NY 10001",
/// )
/// .expect("valid draft");
/// assert_eq!(draft.address(), "20 W 34th St, New York, NY 10001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDraft {
    title: String,
    description: String,
    address: String,
}

impl PlaceDraft {
    /// Validate raw fields in title, description, address order.
    pub fn try_from_parts(
        title: &str,
        description: &str,
        address: &str,
    ) -> Result<Self, PlaceValidationError> {
        let title = validate_title(title)?;
        let description = validate_description(description)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(PlaceValidationError::EmptyAddress);
        }
        Ok(Self {
            title,
            description,
            address: address.to_owned(),
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn address(&self) -> &str {
        self.address.as_str()
    }
}

/// Validated title and description replacing a place's current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceEdit {
    title: String,
    description: String,
}

impl PlaceEdit {
    pub fn try_from_parts(title: &str, description: &str) -> Result<Self, PlaceValidationError> {
        Ok(Self {
            title: validate_title(title)?,
            description: validate_description(description)?,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Stored place record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
    pub image: ImageRef,
    pub creator: UserId,
}

impl Place {
    /// Bind a draft to its location, image and creator.
    pub fn from_draft(
        id: PlaceId,
        draft: PlaceDraft,
        location: Coordinates,
        image: ImageRef,
        creator: UserId,
    ) -> Self {
        let PlaceDraft {
            title,
            description,
            address,
        } = draft;
        Self {
            id,
            title,
            description,
            address,
            location,
            image,
            creator,
        }
    }

    /// Whether `user` created this place.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.creator == *user
    }

    /// Replace the editable fields.
    pub fn apply_edit(&mut self, edit: PlaceEdit) {
        self.title = edit.title;
        self.description = edit.description;
    }
}
