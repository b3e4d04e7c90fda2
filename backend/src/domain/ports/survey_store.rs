//! Driven port for the append-only survey table.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::SurveyRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by survey store adapters.
    pub enum SurveyStoreError {
        /// The backing medium could not be read.
        Read { message: String } => "failed to read survey store: {message}",
        /// The backing medium could not be written.
        Write { message: String } => "failed to write survey store: {message}",
        /// The stored table does not match the `Name`/`Gender` schema.
        Corrupt { message: String } => "survey store is corrupt: {message}",
    }
}

/// Port for the durable survey table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Every record in insertion order. A missing table is empty.
    async fn load_all(&self) -> Result<Vec<SurveyRecord>, SurveyStoreError>;

    /// Append one record after all existing ones.
    async fn append(&self, record: SurveyRecord) -> Result<(), SurveyStoreError>;
}

/// Volatile store used by tests and examples.
#[derive(Debug, Default)]
pub struct InMemorySurveyStore {
    records: Mutex<Vec<SurveyRecord>>,
}

impl InMemorySurveyStore {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyStore for InMemorySurveyStore {
    async fn load_all(&self) -> Result<Vec<SurveyRecord>, SurveyStoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, record: SurveyRecord) -> Result<(), SurveyStoreError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}
