//! Authentication primitives: usernames, credentials and the reserved
//! administrator identity.
//!
//! Inbound payload parsing stays outside the domain; handlers call the
//! constructors here before talking to [`crate::domain::AuthService`].

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

/// Username of the built-in administrator account.
pub const ADMIN_USERNAME: &str = "admin";

/// Password of the built-in administrator account.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Domain error returned when credential inputs are malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username was missing or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Non-blank account name, kept and compared exactly as given.
///
/// # Examples
/// ```
/// use survey_backend::domain::Username;
///
/// let name = Username::new("bob").unwrap();
/// assert_eq!(name.as_str(), "bob");
/// assert_eq!(Username::new(" bob ").unwrap().as_str(), " bob ");
/// assert!(!name.is_reserved());
/// assert!(Username::new("admin").unwrap().is_reserved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate a raw username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialsValidationError> {
        let name = raw.as_ref();
        if name.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        Ok(Self(name.to_owned()))
    }

    /// The reserved administrator identity.
    #[must_use]
    pub fn admin() -> Self {
        Self(ADMIN_USERNAME.to_owned())
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this name belongs to the administrator namespace.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0 == ADMIN_USERNAME
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated username/password pair used by signup and login.
///
/// ## Invariants
/// - `username` satisfies [`Username::new`].
/// - `password` is kept verbatim; no format or strength rules apply.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password exactly as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The fixed, out-of-band administrator account.
///
/// It is never stored in the credential store and is always accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminIdentity;

impl AdminIdentity {
    /// Whether `credentials` are exactly the administrator's.
    #[must_use]
    pub fn matches(credentials: &Credentials) -> bool {
        credentials.username().is_reserved() && credentials.password() == ADMIN_PASSWORD
    }
}
