//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ImageStore, LoginService, PlacesCommand, PlacesQuery, SignupService, TokenVerifier,
    UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub places: Arc<dyn PlacesQuery>,
    pub places_command: Arc<dyn PlacesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub images: Arc<dyn ImageStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub places: Arc<dyn PlacesQuery>,
    pub places_command: Arc<dyn PlacesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenVerifier>,
    pub images: Arc<dyn ImageStore>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use places_backend::domain::ports::FixtureGeocoder;
    /// use places_backend::domain::{PlaceLifecycleService, UserAccountService};
    /// use places_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use places_backend::outbound::memory::MemoryDocumentStore;
    /// use places_backend::outbound::storage::LocalImageStore;
    /// use places_backend::outbound::token::JwtTokenCodec;
    ///
    /// let store = Arc::new(MemoryDocumentStore::with_fixtures());
    /// let images = Arc::new(LocalImageStore::new("uploads/images"));
    /// let places = Arc::new(PlaceLifecycleService::new(
    ///     store.clone(),
    ///     Arc::new(FixtureGeocoder),
    ///     images.clone(),
    /// ));
    /// let accounts = Arc::new(UserAccountService::new(store));
    /// let state = HttpState::new(HttpStatePorts {
    ///     places: places.clone(),
    ///     places_command: places,
    ///     users: accounts.clone(),
    ///     signup: accounts.clone(),
    ///     login: accounts,
    ///     tokens: Arc::new(JwtTokenCodec::new("secret")),
    ///     images,
    /// });
    /// let _places = state.places.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            places,
            places_command,
            users,
            signup,
            login,
            tokens,
            images,
        } = ports;
        Self {
            places,
            places_command,
            users,
            signup,
            login,
            tokens,
            images,
        }
    }
}
