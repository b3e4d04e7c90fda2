//! Account handlers: menu, signup, login and logout.
//!
//! ```text
//! GET  /api/v1/menu
//! POST /api/v1/signup {"username":"bob","password":"pw1"}
//! POST /api/v1/login  {"username":"bob","password":"pw1"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Credentials, CredentialsValidationError, DashboardView, Error, MenuEntry, Session,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for signup and login.
///
/// Example JSON:
/// `{"username":"bob","password":"pw1"}`
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account name, compared exactly as sent.
    pub username: String,
    /// Password; any value is accepted at signup.
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Authenticated identity and the dashboard it lands on.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Logged-in account name.
    pub username: String,
    /// Dashboard the account lands on.
    pub view: DashboardView,
}

impl SessionResponse {
    /// Describe an authenticated `session`; `None` when anonymous.
    pub fn for_session(session: &Session) -> Option<Self> {
        session.identity().map(|identity| Self {
            username: identity.to_string(),
            view: DashboardView::for_identity(identity),
        })
    }
}

/// Navigation entries available to the caller.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MenuResponse {
    /// Whether the session carries an identity.
    pub authenticated: bool,
    /// Entries in display order.
    pub entries: Vec<MenuEntry>,
}

pub(crate) fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
    }
}

/// Navigation selector for the current session.
#[utoipa::path(
    get,
    path = "/api/v1/menu",
    responses(
        (status = 200, description = "Menu entries", body = MenuResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["account"],
    operation_id = "menu",
    security([])
)]
#[get("/menu")]
pub async fn menu(session: SessionContext) -> ApiResult<web::Json<MenuResponse>> {
    let session = session.session()?;
    Ok(web::Json(MenuResponse {
        authenticated: session.is_authenticated(),
        entries: session.menu(),
    }))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["account"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_validation_error)?;
    state.auth.signup(&credentials).await?;
    Ok(HttpResponse::Created().finish())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["account"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_validation_error)?;
    let authenticated = state.auth.login(&credentials).await?;
    session.persist(&authenticated)?;
    SessionResponse::for_session(&authenticated)
        .map(web::Json)
        .ok_or_else(|| Error::internal("login produced an anonymous session"))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["account"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let current = session.session()?;
    let anonymous = state.auth.logout(current);
    session.persist(&anonymous)?;
    Ok(HttpResponse::NoContent().finish())
}
