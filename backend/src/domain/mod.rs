//! Domain primitives, services and ports.
//!
//! Purpose: define the place and user model, the services enforcing
//! ownership and dual-write consistency, and the ports those services talk
//! through. Nothing here knows about HTTP or a particular store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Place, PlaceDraft, PlaceEdit, Coordinates: place records and inputs.
//! - UserAccount, User, SignupDetails, LoginCredentials: accounts.
//! - WriteBatch / DocumentWrite: atomic multi-document writes.
//! - PlaceLifecycleService, UserAccountService: driving port implementations.

pub mod account_service;
pub mod error;
pub mod image;
pub mod place;
pub mod place_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod write_batch;

pub use self::account_service::UserAccountService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::image::{ImageKind, ImageRef, ImageUpload, ImageValidationError, MAX_IMAGE_BYTES};
pub use self::place::{
    Coordinates, DESCRIPTION_MIN, Place, PlaceDraft, PlaceEdit, PlaceId, PlaceValidationError,
};
pub use self::place_service::PlaceLifecycleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, LoginCredentials, PASSWORD_MIN, PLACEHOLDER_USER_IMAGE, Password, SignupDetails,
    User, UserAccount, UserId, UserValidationError,
};
pub use self::write_batch::{DocumentWrite, WriteBatch};
