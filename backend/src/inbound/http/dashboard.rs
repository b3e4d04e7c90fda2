//! Dashboard entry handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};

use crate::domain::{AdminDashboard, Dashboard, Error, UserDashboard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::SessionResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Enter the dashboard for the caller's session.
pub(crate) fn enter(state: &HttpState, session: &SessionContext) -> ApiResult<Dashboard> {
    let session = session.session()?;
    Ok(state.dashboard.enter(&session)?)
}

/// Require the administrator view.
pub(crate) fn require_admin(state: &HttpState, session: &SessionContext) -> ApiResult<AdminDashboard> {
    match enter(state, session)? {
        Dashboard::Admin(admin) => Ok(admin),
        Dashboard::User(_) => Err(Error::forbidden("administrator access required")),
    }
}

/// Require the standard-user view.
pub(crate) fn require_user(state: &HttpState, session: &SessionContext) -> ApiResult<UserDashboard> {
    match enter(state, session)? {
        Dashboard::User(user) => Ok(user),
        Dashboard::Admin(_) => Err(Error::forbidden(
            "the administrator view does not accept survey submissions",
        )),
    }
}

/// Report which dashboard the caller lands on.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard view", body = SessionResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionResponse>> {
    let current = session.session()?;
    let view = state.dashboard.enter(&current)?.view();
    let username = current
        .identity()
        .map(ToString::to_string)
        .ok_or_else(|| Error::unauthorized("login required"))?;
    Ok(web::Json(SessionResponse { username, view }))
}
