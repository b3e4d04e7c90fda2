//! Spreadsheet-backed `SurveyStore` implementation.
//!
//! Appending loads the whole workbook, adds one row and rewrites the file,
//! all while holding the store mutex.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::SurveyRecord;
use crate::domain::ports::{SurveyStore, SurveyStoreError};
use crate::outbound::spreadsheet::{decode_records, encode_records};

/// Survey table persisted as an `.xlsx` workbook.
#[derive(Debug)]
pub struct XlsxSurveyStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl XlsxSurveyStore {
    /// Create a store over `path`. The workbook is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing workbook.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<SurveyRecord>, SurveyStoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "survey store absent; treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(SurveyStoreError::read(format!(
                    "{}: {err}",
                    self.path.display()
                )));
            }
        };
        decode_records(&bytes).map_err(|err| {
            SurveyStoreError::corrupt(format!("{}: {err}", self.path.display()))
        })
    }
}

#[async_trait]
impl SurveyStore for XlsxSurveyStore {
    async fn load_all(&self) -> Result<Vec<SurveyRecord>, SurveyStoreError> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn append(&self, record: SurveyRecord) -> Result<(), SurveyStoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        records.push(record);
        let bytes =
            encode_records(&records).map_err(|err| SurveyStoreError::write(err.to_string()))?;
        tokio::fs::write(&self.path, bytes).await.map_err(|err| {
            SurveyStoreError::write(format!("{}: {err}", self.path.display()))
        })?;
        debug!(rows = records.len(), "survey table rewritten");
        Ok(())
    }
}
