//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only ever stores the authenticated username. Everything else
//! about a [`Session`] is derived from it on each request.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Session, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper exposing domain-level session operations.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Decode the domain session carried by the cookie.
    ///
    /// A cookie holding an invalid username is treated as anonymous.
    pub fn session(&self) -> Result<Session, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(match raw {
            Some(raw) => match Username::new(raw) {
                Ok(identity) => Session::authenticated(identity),
                Err(error) => {
                    tracing::warn!("invalid username in session cookie: {error}");
                    Session::anonymous()
                }
            },
            None => Session::anonymous(),
        })
    }

    /// Persist `session` into the cookie, replacing whatever was there.
    pub fn persist(&self, session: &Session) -> Result<(), Error> {
        match session.identity() {
            Some(identity) => {
                self.0.renew();
                self.0
                    .insert(USERNAME_KEY, identity.as_str())
                    .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
            }
            None => {
                self.purge();
                Ok(())
            }
        }
    }

    /// Drop all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
