//! Flat-file persistence adapters.
//!
//! - `YamlCredentialStore`: users file, a YAML `username: password` mapping.
//! - `XlsxSurveyStore`: survey workbook with `Name` and `Gender` columns.
//!
//! Adapters only translate between files and domain types. Each one guards
//! its whole-file read-modify-write behind a single async mutex.

mod xlsx_survey_store;
mod yaml_credential_store;

pub use xlsx_survey_store::XlsxSurveyStore;
pub use yaml_credential_store::YamlCredentialStore;
