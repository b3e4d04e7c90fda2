//! Driven port turning the survey table into a downloadable document.

use crate::domain::SurveyRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised while encoding an export.
    pub enum SurveyExportError {
        /// The encoder rejected the table.
        Encode { message: String } => "failed to encode survey export: {message}",
    }
}

/// Encodes survey records as a document for download.
#[cfg_attr(test, mockall::automock)]
pub trait SurveyExporter: Send + Sync {
    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    /// Suggested download file name.
    fn file_name(&self) -> &'static str;

    /// Encode `records`, header row included.
    fn encode(&self, records: &[SurveyRecord]) -> Result<Vec<u8>, SurveyExportError>;
}
