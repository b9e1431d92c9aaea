//! Tests for HTTP error mapping.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::{Error, messages};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::entry_validation(messages::PENDING_DEPARTURE), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::capacity(messages::NO_CELLS_AVAILABLE), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(
    Error::departure_validation(messages::ENTRY_NOT_FOUND),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::internal("boom"), StatusCode::BAD_REQUEST)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("repository unavailable: connection refused")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"host": "db"}));

    let payload = assert_error_response(
        error,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn registration_errors_keep_their_message(expected_trace_id: String) {
    let error = Error::capacity(messages::NO_CELLS_AVAILABLE)
        .with_trace_id(expected_trace_id.clone());

    let payload = assert_error_response(
        error,
        StatusCode::UNPROCESSABLE_ENTITY,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::Capacity);
    assert_eq!(payload.message(), messages::NO_CELLS_AVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "vehicleId"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "vehicleId"})));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_becomes_invalid_request() {
    let request = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &request);

    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}

#[rstest]
fn actix_errors_become_internal() {
    let err = actix_web::error::ErrorBadGateway("upstream");
    let mapped = Error::from(err);
    assert_eq!(mapped.code(), ErrorCode::InternalError);
}
