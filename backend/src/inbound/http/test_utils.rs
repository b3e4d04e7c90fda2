//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::ports::{InMemoryCredentialStore, InMemorySurveyStore};
use crate::inbound::http::state::HttpState;
use crate::outbound::spreadsheet::XlsxSurveyExporter;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over empty in-memory stores.
pub fn in_memory_state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemorySurveyStore::new()),
        Arc::new(XlsxSurveyExporter),
    ))
}
