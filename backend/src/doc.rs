//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint together with the session cookie
//! security scheme. The document backs Swagger UI in debug builds and the
//! `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{DashboardView, Error, ErrorCode, Gender, MenuEntry, SurveyRecord};
use crate::inbound::http::auth::{CredentialsRequest, MenuResponse, SessionResponse};
use crate::inbound::http::surveys::SurveyRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Survey backend API",
        description = "Account signup and login, survey submission and administrator export."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::menu,
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::surveys::submit_survey,
        crate::inbound::http::surveys::list_surveys,
        crate::inbound::http::surveys::export_surveys,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsRequest,
        SessionResponse,
        MenuResponse,
        MenuEntry,
        DashboardView,
        SurveyRequest,
        SurveyRecord,
        Gender
    )),
    tags(
        (name = "account", description = "Signup, login and navigation"),
        (name = "dashboard", description = "Dashboard routing"),
        (name = "surveys", description = "Survey submission and export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
