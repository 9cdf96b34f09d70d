//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after a migration changes.

diesel::table! {
    /// Registered accounts. `place_ids` is the ordered back-reference list.
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        password -> Text,
        image -> Text,
        place_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    places (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        address -> Text,
        lat -> Float8,
        lng -> Float8,
        image -> Text,
        creator_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(places -> users (creator_id));

diesel::allow_tables_to_appear_in_same_query!(places, users);
