//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
pub mod surveys;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` handler on `cfg`.
///
/// Session middleware is left to the caller so servers and tests can choose
/// their own cookie settings.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::menu)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(dashboard::dashboard)
        .service(surveys::submit_survey)
        .service(surveys::export_surveys)
        .service(surveys::list_surveys);
}
