//! Seed records for the in-memory store.

use uuid::Uuid;

use crate::domain::ports::{FIXTURE_LAT, FIXTURE_LNG};
use crate::domain::{
    Coordinates, EmailAddress, ImageRef, Password, Place, PlaceId, UserAccount, UserId,
    PLACEHOLDER_USER_IMAGE,
};

/// Identifier of the seeded user.
pub const FIXTURE_USER_ID: Uuid = Uuid::from_u128(0x6d2b_9c0e_31f4_4c3a_9a57_2f1e_8b40_0001);
/// Identifier of the seeded place.
pub const FIXTURE_PLACE_ID: Uuid = Uuid::from_u128(0x6d2b_9c0e_31f4_4c3a_9a57_2f1e_8b40_0101);

/// Carter Moore, owner of the seeded place.
pub fn fixture_user() -> UserAccount {
    UserAccount {
        id: UserId::from_uuid(FIXTURE_USER_ID),
        name: "Carter Moore".to_owned(),
        email: EmailAddress::new("test@test.com")
            .unwrap_or_else(|err| panic!("fixture email must be valid: {err}")),
        password: Password::from_stored("testers"),
        image: ImageRef::new(PLACEHOLDER_USER_IMAGE),
        places: vec![PlaceId::from_uuid(FIXTURE_PLACE_ID)],
    }
}

/// The Empire State Building, owned by [`fixture_user`].
pub fn fixture_place() -> Place {
    Place {
        id: PlaceId::from_uuid(FIXTURE_PLACE_ID),
        title: "Empire State Building".to_owned(),
        description: "One of the most famous sky scrapers in the world!".to_owned(),
        address: "20 W 34th St, New York, NY 10001".to_owned(),
        location: Coordinates {
            lat: FIXTURE_LAT,
            lng: FIXTURE_LNG,
        },
        image: ImageRef::new("uploads/images/empire-state-building.jpeg"),
        creator: UserId::from_uuid(FIXTURE_USER_ID),
    }
}
