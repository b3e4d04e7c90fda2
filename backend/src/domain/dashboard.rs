//! Dashboard routing for authenticated sessions.
//!
//! [`DashboardService::enter`] is the only way to obtain a dashboard. The
//! administrator lands on [`AdminDashboard`] (read and export every record);
//! everyone else lands on [`UserDashboard`] (submit one record at a time).
//! Each view only exposes the operations its identity may perform.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::ports::{SurveyExportError, SurveyExporter, SurveyStore, SurveyStoreError};
use crate::domain::{Error, Session, SurveyRecord, SurveyValidationError, Username};

/// Which dashboard a session lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    /// Administrator view over all records.
    Admin,
    /// Standard-user survey form.
    User,
}

impl DashboardView {
    /// View for an authenticated `identity`.
    #[must_use]
    pub fn for_identity(identity: &Username) -> Self {
        if identity.is_reserved() {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// Raised when a dashboard is requested without logging in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// The session carries no identity.
    #[error("login required")]
    NotAuthenticated,
}

impl From<DashboardError> for Error {
    fn from(value: DashboardError) -> Self {
        match value {
            DashboardError::NotAuthenticated => Error::unauthorized("login required"),
        }
    }
}

/// Survey submission failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// A required field is missing or invalid.
    #[error(transparent)]
    Validation(#[from] SurveyValidationError),
    /// The survey store failed.
    #[error(transparent)]
    Store(#[from] SurveyStoreError),
}

impl From<SubmitError> for Error {
    fn from(value: SubmitError) -> Self {
        match value {
            SubmitError::Validation(err) => {
                let message = match err {
                    SurveyValidationError::NameTooLong { .. } => err.to_string(),
                    _ => "Both fields are required to submit the survey.".to_owned(),
                };
                Error::invalid_request(message)
                    .with_details(json!({
                        "field": err.field(),
                        "code": err.code(),
                        "reason": err.to_string(),
                    }))
            }
            SubmitError::Store(err) => {
                error!(error = %err, "survey submission failed on survey store");
                Error::internal(err.to_string())
            }
        }
    }
}

/// Export failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// Reading the table failed.
    #[error(transparent)]
    Store(#[from] SurveyStoreError),
    /// Encoding the table failed.
    #[error(transparent)]
    Encode(#[from] SurveyExportError),
}

impl From<ExportError> for Error {
    fn from(value: ExportError) -> Self {
        error!(error = %value, "survey export failed");
        Error::internal(value.to_string())
    }
}

impl From<SurveyStoreError> for Error {
    fn from(value: SurveyStoreError) -> Self {
        error!(error = %value, "survey store failed");
        Error::internal(value.to_string())
    }
}

/// Encoded survey table ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetExport {
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: &'static str,
    /// Document body.
    pub bytes: Vec<u8>,
}

/// Entry point that routes sessions to their dashboard.
#[derive(Clone)]
pub struct DashboardService {
    surveys: Arc<dyn SurveyStore>,
    exporter: Arc<dyn SurveyExporter>,
}

impl DashboardService {
    /// Create a service over the survey table and its export encoder.
    pub fn new(surveys: Arc<dyn SurveyStore>, exporter: Arc<dyn SurveyExporter>) -> Self {
        Self { surveys, exporter }
    }

    /// Enter the dashboard matching `session`'s identity.
    pub fn enter(&self, session: &Session) -> Result<Dashboard, DashboardError> {
        let identity = session.identity().ok_or(DashboardError::NotAuthenticated)?;
        Ok(match DashboardView::for_identity(identity) {
            DashboardView::Admin => Dashboard::Admin(AdminDashboard {
                surveys: Arc::clone(&self.surveys),
                exporter: Arc::clone(&self.exporter),
            }),
            DashboardView::User => Dashboard::User(UserDashboard {
                identity: identity.clone(),
                surveys: Arc::clone(&self.surveys),
            }),
        })
    }
}

/// Dashboard reached by an authenticated session.
pub enum Dashboard {
    /// Administrator view.
    Admin(AdminDashboard),
    /// Standard-user view.
    User(UserDashboard),
}

impl Dashboard {
    /// Which view this is.
    #[must_use]
    pub fn view(&self) -> DashboardView {
        match self {
            Self::Admin(_) => DashboardView::Admin,
            Self::User(_) => DashboardView::User,
        }
    }
}

/// Read-only view over every submitted record.
pub struct AdminDashboard {
    surveys: Arc<dyn SurveyStore>,
    exporter: Arc<dyn SurveyExporter>,
}

impl AdminDashboard {
    /// Every record in insertion order.
    pub async fn list_all_records(&self) -> Result<Vec<SurveyRecord>, SurveyStoreError> {
        self.surveys.load_all().await
    }

    /// The full table encoded for download.
    pub async fn export_as_spreadsheet(&self) -> Result<SpreadsheetExport, ExportError> {
        let records = self.surveys.load_all().await?;
        let bytes = self.exporter.encode(&records)?;
        info!(rows = records.len(), "survey table exported");
        Ok(SpreadsheetExport {
            content_type: self.exporter.content_type(),
            file_name: self.exporter.file_name(),
            bytes,
        })
    }
}

/// Survey form for standard users.
pub struct UserDashboard {
    identity: Username,
    surveys: Arc<dyn SurveyStore>,
}

impl UserDashboard {
    /// Validate and append one survey row.
    ///
    /// Nothing is written when validation fails.
    pub async fn submit(&self, name: &str, gender: Option<&str>) -> Result<(), SubmitError> {
        let record = SurveyRecord::try_from_parts(name, gender)?;
        self.surveys.append(record).await?;
        info!(identity = %self.identity, "survey submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, MAX_NAME_CHARS};
    use crate::domain::ports::{InMemorySurveyStore, MockSurveyExporter, MockSurveyStore};
    use rstest::{fixture, rstest};

    fn session(name: &str) -> Session {
        Session::authenticated(Username::new(name).expect("valid username"))
    }

    fn exporter() -> MockSurveyExporter {
        let mut exporter = MockSurveyExporter::new();
        exporter.expect_content_type().return_const("text/plain");
        exporter.expect_file_name().return_const("survey.txt");
        exporter.expect_encode().returning(|records| {
            Ok(records
                .iter()
                .map(|r| format!("{},{}\n", r.name(), r.gender()))
                .collect::<String>()
                .into_bytes())
        });
        exporter
    }

    #[fixture]
    fn service() -> DashboardService {
        DashboardService::new(Arc::new(InMemorySurveyStore::new()), Arc::new(exporter()))
    }

    fn admin(service: &DashboardService) -> AdminDashboard {
        match service.enter(&session("admin")).expect("admin enters") {
            Dashboard::Admin(admin) => admin,
            Dashboard::User(_) => panic!("admin must land on the admin view"),
        }
    }

    fn user(service: &DashboardService, name: &str) -> UserDashboard {
        match service.enter(&session(name)).expect("user enters") {
            Dashboard::User(user) => user,
            Dashboard::Admin(_) => panic!("{name} must land on the user view"),
        }
    }

    #[rstest]
    fn anonymous_session_cannot_enter(service: DashboardService) {
        let result = service.enter(&Session::anonymous());
        assert!(matches!(result, Err(DashboardError::NotAuthenticated)));
    }

    #[rstest]
    #[case("admin", DashboardView::Admin)]
    #[case("bob", DashboardView::User)]
    fn identity_selects_view(
        service: DashboardService,
        #[case] name: &str,
        #[case] expected: DashboardView,
    ) {
        let dashboard = service.enter(&session(name)).expect("enter dashboard");
        assert_eq!(dashboard.view(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn appended_records_are_listed_in_order(service: DashboardService) {
        let bob = user(&service, "bob");
        let submissions = [
            ("Carol", Gender::Female),
            ("Dan", Gender::Male),
            ("Eve", Gender::Others),
            ("Carol", Gender::Female),
        ];
        for (name, gender) in submissions {
            bob.submit(name, Some(gender.as_str())).await.expect("submit");
        }

        let records = admin(&service).list_all_records().await.expect("list");

        let observed: Vec<_> = records.iter().map(|r| (r.name(), r.gender())).collect();
        assert_eq!(observed, submissions.to_vec());
    }

    #[rstest]
    #[case("", Some("Male"))]
    #[case("Alice", None)]
    #[case("Alice", Some(""))]
    #[tokio::test]
    async fn invalid_submission_appends_nothing(#[case] name: &str, #[case] gender: Option<&str>) {
        let mut store = MockSurveyStore::new();
        store.expect_append().times(0);
        let service = DashboardService::new(Arc::new(store), Arc::new(exporter()));

        let err = user(&service, "bob")
            .submit(name, gender)
            .await
            .expect_err("submission must be rejected");

        assert!(matches!(err, SubmitError::Validation(_)));
        assert_eq!(Error::from(err).code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn oversized_name_reports_its_limit() {
        let mut store = MockSurveyStore::new();
        store.expect_append().times(0);
        let service = DashboardService::new(Arc::new(store), Arc::new(exporter()));
        let name = "a".repeat(MAX_NAME_CHARS + 1);

        let err = user(&service, "bob")
            .submit(&name, Some("Male"))
            .await
            .expect_err("oversized name must be rejected");

        let mapped = Error::from(err);
        assert_eq!(mapped.code(), crate::domain::ErrorCode::InvalidRequest);
        assert!(mapped.message().contains("32767"));
        let details = mapped.details().expect("details present");
        assert_eq!(details.get("code").and_then(serde_json::Value::as_str), Some("name_too_long"));
    }

    #[rstest]
    #[tokio::test]
    async fn export_encodes_full_table(service: DashboardService) {
        user(&service, "bob")
            .submit("Carol", Some("Female"))
            .await
            .expect("submit");

        let export = admin(&service).export_as_spreadsheet().await.expect("export");

        assert_eq!(export.content_type, "text/plain");
        assert_eq!(export.file_name, "survey.txt");
        assert_eq!(export.bytes, b"Carol,Female\n".to_vec());
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_surfaces_as_internal_error() {
        let mut store = MockSurveyStore::new();
        store
            .expect_append()
            .times(1)
            .returning(|_| Err(SurveyStoreError::write("read-only medium")));
        let service = DashboardService::new(Arc::new(store), Arc::new(exporter()));

        let err = user(&service, "bob")
            .submit("Carol", Some("Female"))
            .await
            .expect_err("store failure must surface");

        assert_eq!(err, SubmitError::Store(SurveyStoreError::write("read-only medium")));
        assert_eq!(Error::from(err).code(), crate::domain::ErrorCode::InternalError);
    }
}
