//! YAML-file-backed `CredentialStore` implementation.
//!
//! The file holds a single mapping of `username: password`. Every operation
//! re-reads (and, for writes, rewrites) the whole file while holding the
//! store mutex, so concurrent requests in one process cannot lose updates.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Username;
use crate::domain::ports::{CredentialMap, CredentialStore, CredentialStoreError, Registration};

/// Credential store persisted as a YAML mapping.
#[derive(Debug)]
pub struct YamlCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl YamlCredentialStore {
    /// Create a store over `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_users(&self) -> Result<CredentialMap, CredentialStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => parse_users(&text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "credential store absent; treating as empty");
                Ok(CredentialMap::new())
            }
            Err(err) => Err(CredentialStoreError::read(format!(
                "{}: {err}",
                self.path.display()
            ))),
        }
    }

    async fn write_users(&self, users: &CredentialMap) -> Result<(), CredentialStoreError> {
        let text = serde_yaml::to_string(users)
            .map_err(|err| CredentialStoreError::write(err.to_string()))?;
        tokio::fs::write(&self.path, text).await.map_err(|err| {
            CredentialStoreError::write(format!("{}: {err}", self.path.display()))
        })
    }
}

fn parse_users(text: &str) -> Result<CredentialMap, CredentialStoreError> {
    if text.trim().is_empty() {
        return Ok(CredentialMap::new());
    }
    let users: Option<CredentialMap> =
        serde_yaml::from_str(text).map_err(|err| CredentialStoreError::malformed(err.to_string()))?;
    Ok(users.unwrap_or_default())
}

#[async_trait]
impl CredentialStore for YamlCredentialStore {
    async fn load(&self) -> Result<CredentialMap, CredentialStoreError> {
        let _guard = self.lock.lock().await;
        self.read_users().await
    }

    async fn save(&self, users: &CredentialMap) -> Result<(), CredentialStoreError> {
        let _guard = self.lock.lock().await;
        self.write_users(users).await
    }

    async fn register(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Registration, CredentialStoreError> {
        let _guard = self.lock.lock().await;
        let mut users = self.read_users().await?;
        if users.contains_key(username.as_str()) {
            return Ok(Registration::AlreadyExists);
        }
        users.insert(username.to_string(), password.to_owned());
        self.write_users(&users).await?;
        Ok(Registration::Created)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn dir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn store_in(dir: &TempDir) -> YamlCredentialStore {
        YamlCredentialStore::new(dir.path().join("users.yaml"))
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_loads_empty(dir: TempDir) {
        let users = store_in(&dir).load().await.expect("load");
        assert!(users.is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("\n")]
    #[case("~\n")]
    #[case("{}\n")]
    #[tokio::test]
    async fn empty_documents_load_empty(dir: TempDir, #[case] contents: &str) {
        let store = store_in(&dir);
        std::fs::write(store.path(), contents).expect("seed file");

        let users = store.load().await.expect("load");

        assert!(users.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn save_then_load_round_trips(dir: TempDir) {
        let store = store_in(&dir);
        let users = CredentialMap::from([
            ("bob".to_owned(), "pw1".to_owned()),
            ("carol".to_owned(), "123".to_owned()),
            ("dave".to_owned(), "yes".to_owned()),
            ("erin".to_owned(), String::new()),
        ]);

        store.save(&users).await.expect("save");

        assert_eq!(store.load().await.expect("load"), users);
    }

    #[rstest]
    #[tokio::test]
    async fn file_is_a_plain_key_value_mapping(dir: TempDir) {
        let store = store_in(&dir);
        let bob = Username::new("bob").expect("valid username");

        store.register(&bob, "pw1").await.expect("register");

        let text = std::fs::read_to_string(store.path()).expect("read file");
        assert_eq!(text, "bob: pw1\n");
    }

    #[rstest]
    #[tokio::test]
    async fn registrations_survive_a_fresh_instance(dir: TempDir) {
        let bob = Username::new("bob").expect("valid username");
        store_in(&dir).register(&bob, "pw1").await.expect("register");

        let reopened = store_in(&dir);

        assert_eq!(
            reopened.register(&bob, "pw2").await.expect("register again"),
            Registration::AlreadyExists
        );
        let users = reopened.load().await.expect("load");
        assert_eq!(users.get("bob").map(String::as_str), Some("pw1"));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_registrations_are_all_kept(dir: TempDir) {
        let store = Arc::new(store_in(&dir));
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let name = Username::new(format!("user{i}")).expect("valid username");
                    store.register(&name, "pw").await
                })
            })
            .collect();
        for task in tasks {
            let outcome = task.await.expect("task joins").expect("register");
            assert_eq!(outcome, Registration::Created);
        }

        assert_eq!(store.load().await.expect("load").len(), 16);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_document_is_reported(dir: TempDir) {
        let store = store_in(&dir);
        std::fs::write(store.path(), "- just\n- a list\n").expect("seed file");

        let err = store.load().await.expect_err("list is not a mapping");

        assert!(matches!(err, CredentialStoreError::Malformed { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unwritable_medium_is_reported(dir: TempDir) {
        // A directory in place of the file cannot be written as one.
        let store = YamlCredentialStore::new(dir.path());

        let err = store
            .save(&CredentialMap::new())
            .await
            .expect_err("cannot write over a directory");

        assert!(matches!(err, CredentialStoreError::Write { .. }));
    }
}
