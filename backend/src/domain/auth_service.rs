//! Signup, login and logout use-cases.
//!
//! Credentials are checked against the reserved administrator identity first
//! and the credential store second. Nothing is cached; each call re-reads the
//! store.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{CredentialStore, CredentialStoreError, Registration};
use crate::domain::{AdminIdentity, Credentials, Error, Session, Username};

/// Signup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    /// The username is registered already or is reserved.
    #[error("username '{username}' already exists")]
    UsernameTaken {
        /// Rejected username.
        username: Username,
    },
    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    /// No account matches the supplied pair.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] CredentialStoreError),
}

impl From<SignupError> for Error {
    fn from(value: SignupError) -> Self {
        match value {
            SignupError::UsernameTaken { .. } => {
                Error::conflict("Username already exists. Choose a different one.")
            }
            SignupError::Store(err) => {
                tracing::error!(error = %err, "signup failed on credential store");
                Error::internal(err.to_string())
            }
        }
    }
}

impl From<LoginError> for Error {
    fn from(value: LoginError) -> Self {
        match value {
            LoginError::InvalidCredentials => Error::unauthorized("Invalid username or password"),
            LoginError::Store(err) => {
                tracing::error!(error = %err, "login failed on credential store");
                Error::internal(err.to_string())
            }
        }
    }
}

/// Authentication service backed by a [`CredentialStore`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use survey_backend::domain::ports::InMemoryCredentialStore;
/// use survey_backend::domain::{AuthService, Credentials};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let auth = AuthService::new(Arc::new(InMemoryCredentialStore::new()));
/// let creds = Credentials::try_from_parts("bob", "pw1").unwrap();
/// auth.signup(&creds).await.unwrap();
/// let session = auth.login(&creds).await.unwrap();
/// assert_eq!(session.identity().unwrap().as_str(), "bob");
/// # });
/// ```
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
}

impl AuthService {
    /// Create a service over `credentials`.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Register a new account.
    ///
    /// The reserved administrator name is refused like any taken name.
    pub async fn signup(&self, credentials: &Credentials) -> Result<(), SignupError> {
        let username = credentials.username();
        if username.is_reserved() {
            debug!(%username, "signup refused for reserved identity");
            return Err(SignupError::UsernameTaken {
                username: username.clone(),
            });
        }

        match self
            .credentials
            .register(username, credentials.password())
            .await?
        {
            Registration::Created => {
                info!(%username, "account created");
                Ok(())
            }
            Registration::AlreadyExists => Err(SignupError::UsernameTaken {
                username: username.clone(),
            }),
        }
    }

    /// Check credentials and open a session for them.
    ///
    /// Reserved names only ever authenticate as the administrator; a stray
    /// `admin` entry in the store is ignored.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, LoginError> {
        let username = credentials.username();
        if AdminIdentity::matches(credentials) {
            info!("administrator logged in");
            return Ok(Session::authenticated(Username::admin()));
        }
        if username.is_reserved() {
            return Err(LoginError::InvalidCredentials);
        }

        let users = self.credentials.load().await?;
        match users.get(username.as_str()) {
            Some(stored) if stored.as_str() == credentials.password() => {
                info!(%username, "user logged in");
                Ok(Session::authenticated(username.clone()))
            }
            _ => {
                debug!(%username, "login rejected");
                Err(LoginError::InvalidCredentials)
            }
        }
    }

    /// Close `session`, returning a fresh anonymous one.
    pub fn logout(&self, session: Session) -> Session {
        if let Some(identity) = session.identity() {
            info!(%identity, "logged out");
        }
        Session::anonymous()
    }
}
