//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_body(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, trace_id, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("failed to write users.yaml: permission denied")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "path": "/srv/users.yaml" }));

    let (status, trace_id, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body.message(), "Internal server error");
    assert!(body.details().is_none());
    assert_eq!(body.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("Both fields are required to submit the survey.")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "name" }));

    let (status, trace_id, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(trace_id.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body, error);
}

#[rstest]
#[actix_web::test]
async fn trace_header_is_omitted_without_trace_id() {
    let (_, trace_id, _) = response_body(&Error::conflict("taken")).await;
    assert!(trace_id.is_none());
}
