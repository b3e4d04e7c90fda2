//! Survey handlers.
//!
//! ```text
//! POST /api/v1/surveys {"name":"Carol","gender":"Female"}
//! GET  /api/v1/surveys
//! GET  /api/v1/surveys/export
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, SurveyRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dashboard::{require_admin, require_user};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Survey submission body.
///
/// Both fields are validated by the domain so a missing value is reported
/// the same way as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SurveyRequest {
    /// Respondent name, stored exactly as sent.
    #[serde(default)]
    pub name: String,
    /// `Male`, `Female` or `Others`.
    #[serde(default)]
    pub gender: Option<String>,
}

/// Append one survey record.
#[utoipa::path(
    post,
    path = "/api/v1/surveys",
    request_body = SurveyRequest,
    responses(
        (status = 201, description = "Survey stored"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Administrator cannot submit", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["surveys"],
    operation_id = "submitSurvey"
)]
#[post("/surveys")]
pub async fn submit_survey(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SurveyRequest>,
) -> ApiResult<HttpResponse> {
    let user = require_user(&state, &session)?;
    let SurveyRequest { name, gender } = payload.into_inner();
    user.submit(&name, gender.as_deref()).await?;
    Ok(HttpResponse::Created().finish())
}

/// List every stored record in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/surveys",
    responses(
        (status = 200, description = "Survey records", body = [SurveyRecord]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Administrator access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["surveys"],
    operation_id = "listSurveys"
)]
#[get("/surveys")]
pub async fn list_surveys(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SurveyRecord>>> {
    let admin = require_admin(&state, &session)?;
    Ok(web::Json(admin.list_all_records().await?))
}

/// Download the whole table as a spreadsheet.
#[utoipa::path(
    get,
    path = "/api/v1/surveys/export",
    responses(
        (status = 200, description = "Spreadsheet attachment",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            body = Vec<u8>),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Administrator access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["surveys"],
    operation_id = "exportSurveys"
)]
#[get("/surveys/export")]
pub async fn export_surveys(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session)?;
    let export = admin.export_as_spreadsheet().await?;
    Ok(HttpResponse::Ok()
        .content_type(export.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export.file_name.to_owned())],
        })
        .body(export.bytes))
}
