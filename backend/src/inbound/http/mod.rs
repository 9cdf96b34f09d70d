//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod places;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod upload;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings: undecodable bodies are reported like any other
/// invalid input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejecting undecodable JSON body");
        validation::invalid_body_error().into()
    })
}

/// Register every API route. Mount under `/api`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use places_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(places::list_user_places)
        .service(places::get_place)
        .service(places::create_place)
        .service(places::update_place)
        .service(places::delete_place)
        .service(users::list_users)
        .service(users::signup)
        .service(users::login);
}
