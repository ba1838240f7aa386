//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, "\"invalid_request\"")]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized, "\"unauthorized\"")]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden, "\"forbidden\"")]
#[case(Error::not_found("gone"), ErrorCode::NotFound, "\"not_found\"")]
#[case(Error::conflict("taken"), ErrorCode::Conflict, "\"conflict\"")]
#[case(Error::unsupported_format("xml"), ErrorCode::UnsupportedFormat, "\"unsupported_format\"")]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable, "\"service_unavailable\"")]
#[case(Error::internal("boom"), ErrorCode::InternalError, "\"internal_error\"")]
fn constructors_set_code(#[case] error: Error, #[case] code: ErrorCode, #[case] wire: &str) {
    assert_eq!(error.code(), code);
    assert_eq!(serde_json::to_string(&code).expect("serialise code"), wire);
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::not_found("Unknown role.");
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value, json!({ "code": "not_found", "message": "Unknown role." }));
}

#[rstest]
fn trace_id_and_details_are_serialised_when_present() {
    let error = Error::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "password" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "password");
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let trace_id = TraceId::generate();
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("Username already exists.").to_string(), "Username already exists.");
}
