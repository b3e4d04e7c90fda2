//! Driven port for persisting self-registered credentials.
//!
//! Adapters own the durable representation. Every call works on the whole
//! mapping; there is no cache between calls.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::Username;

use super::define_port_error;

/// Username to plaintext password mapping, ordered by username.
pub type CredentialMap = BTreeMap<String, String>;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// The backing medium could not be read.
        Read { message: String } => "failed to read credential store: {message}",
        /// The backing medium could not be written.
        Write { message: String } => "failed to write credential store: {message}",
        /// The stored document is not a username to password mapping.
        Malformed { message: String } => "credential store is malformed: {message}",
    }
}

/// Outcome of [`CredentialStore::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The pair was persisted.
    Created,
    /// The username was already present; nothing was written.
    AlreadyExists,
}

/// Port for the durable username to password mapping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the full mapping. A store that does not exist yet is empty.
    async fn load(&self) -> Result<CredentialMap, CredentialStoreError>;

    /// Replace the full mapping.
    async fn save(&self, users: &CredentialMap) -> Result<(), CredentialStoreError>;

    /// Insert a new pair unless the username is present, as one
    /// read-modify-write unit.
    async fn register(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Registration, CredentialStoreError>;
}

/// Volatile store used by tests and examples.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<CredentialMap>,
}

impl InMemoryCredentialStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `users`.
    #[must_use]
    pub fn with_users(users: CredentialMap) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<CredentialMap, CredentialStoreError> {
        Ok(self.users.lock().await.clone())
    }

    async fn save(&self, users: &CredentialMap) -> Result<(), CredentialStoreError> {
        *self.users.lock().await = users.clone();
        Ok(())
    }

    async fn register(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Registration, CredentialStoreError> {
        let mut users = self.users.lock().await;
        if users.contains_key(username.as_str()) {
            return Ok(Registration::AlreadyExists);
        }
        users.insert(username.to_string(), password.to_owned());
        Ok(Registration::Created)
    }
}
