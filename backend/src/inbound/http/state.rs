//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain services and remain testable without touching the filesystem.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, SurveyExporter, SurveyStore};
use crate::domain::{AuthService, DashboardService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: AuthService,
    pub dashboard: DashboardService,
}

impl HttpState {
    /// Construct state from the three outbound adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use survey_backend::domain::ports::{InMemoryCredentialStore, InMemorySurveyStore};
    /// use survey_backend::inbound::http::state::HttpState;
    /// use survey_backend::outbound::spreadsheet::XlsxSurveyExporter;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryCredentialStore::new()),
    ///     Arc::new(InMemorySurveyStore::new()),
    ///     Arc::new(XlsxSurveyExporter),
    /// );
    /// let _ = state.auth.clone();
    /// ```
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        surveys: Arc<dyn SurveyStore>,
        exporter: Arc<dyn SurveyExporter>,
    ) -> Self {
        Self {
            auth: AuthService::new(credentials),
            dashboard: DashboardService::new(surveys, exporter),
        }
    }
}
