//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod survey_export;
mod survey_store;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{
    CredentialMap, CredentialStore, CredentialStoreError, InMemoryCredentialStore, Registration,
};
#[cfg(test)]
pub use survey_export::MockSurveyExporter;
pub use survey_export::{SurveyExportError, SurveyExporter};
#[cfg(test)]
pub use survey_store::MockSurveyStore;
pub use survey_store::{InMemorySurveyStore, SurveyStore, SurveyStoreError};
