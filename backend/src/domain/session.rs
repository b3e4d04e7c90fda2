//! Per-client authentication state.
//!
//! A [`Session`] belongs to exactly one client connection. The HTTP adapter
//! decodes it from the session cookie on every request and never shares it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Username;

/// Authentication state of one client.
///
/// `authenticated` is derived from the presence of an identity, so the two can
/// never disagree.
///
/// # Examples
/// ```
/// use survey_backend::domain::{Session, Username};
///
/// let anonymous = Session::anonymous();
/// assert!(!anonymous.is_authenticated());
///
/// let session = Session::authenticated(Username::new("bob").unwrap());
/// assert_eq!(session.identity().map(ToString::to_string), Some("bob".to_owned()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<Username>,
}

impl Session {
    /// Fresh unauthenticated session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session bound to `identity`.
    #[must_use]
    pub fn authenticated(identity: Username) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Whether a user has logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Attached identity, if authenticated.
    #[must_use]
    pub fn identity(&self) -> Option<&Username> {
        self.identity.as_ref()
    }

    /// Whether the attached identity is the administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Username::is_reserved)
    }

    /// Navigation entries offered to this session.
    ///
    /// Anonymous clients may choose between logging in and signing up; once
    /// authenticated only the dashboard is offered.
    #[must_use]
    pub fn menu(&self) -> Vec<MenuEntry> {
        if self.is_authenticated() {
            vec![MenuEntry::Dashboard]
        } else {
            vec![MenuEntry::Login, MenuEntry::SignUp]
        }
    }
}

/// Entry in the navigation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MenuEntry {
    /// Login screen.
    Login,
    /// Sign-up screen.
    SignUp,
    /// Dashboard for the logged-in identity.
    Dashboard,
}
