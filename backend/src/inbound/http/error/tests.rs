//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case::invalid(Error::invalid_request("bad"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case::unauthenticated(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case::not_owner(Error::forbidden("denied"), StatusCode::UNAUTHORIZED)]
#[case::missing(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case::unavailable(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn render(error: Error) -> (Option<String>, Value) {
    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    (header, serde_json::from_slice(&bytes).expect("json body"))
}

#[actix_web::test]
async fn internal_errors_keep_message_but_drop_details() {
    let error = Error::internal("Something went wrong, could not find a place.")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "secret": "connection refused" }));
    let (header, body) = render(error).await;
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Something went wrong, could not find a place.",
            "traceId": TRACE_ID,
        })
    );
}

#[actix_web::test]
async fn validation_errors_keep_details() {
    let error = Error::invalid_request("Invalid inputs passed, please check your data.")
        .with_details(json!({ "field": "title", "code": "empty_title" }));
    let (header, body) = render(error).await;
    assert!(header.is_none());
    assert_eq!(body["details"]["field"], "title");
    assert_eq!(body["code"], "invalid_request");
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream");
    let err = Error::from(actix);
    assert_eq!(err.code(), ErrorCode::InternalError);
}
