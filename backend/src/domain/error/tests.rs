//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::too_many_requests("slow down"), ErrorCode::TooManyRequests)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("  ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("clash") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("book not found")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "book not found" }));
}

#[rstest]
fn round_trips_details_and_trace_id(expected_trace_id: String) {
    let error = Error::too_many_requests("Do not spam: wait 30s")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "retryAfterSecs": 30 }));

    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(
        value.get("traceId").and_then(serde_json::Value::as_str),
        Some(expected_trace_id.as_str())
    );
    let decoded: Error = serde_json::from_value(value).expect("deserialise");
    assert_eq!(decoded, error);
}

#[rstest]
fn deserialising_blank_trace_id_fails() {
    let result = serde_json::from_value::<Error>(
        json!({ "code": "conflict", "message": "clash", "traceId": "  " }),
    );
    assert!(result.is_err());
}

#[rstest]
fn deserialising_blank_message_fails() {
    let result = serde_json::from_value::<Error>(json!({ "code": "conflict", "message": " " }));
    assert!(result.is_err());
}
