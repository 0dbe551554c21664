//! Test utilities for handler testing.
//!
//! Shared fixtures for building hello requests and API Gateway events.
//!
//! # Usage
//!
//! ```ignore
//! use abk_hello_shared::test_utils::{get_event, valid_input, mock_request_id};
//!
//! #[test]
//! fn test_handler() {
//!     let payload = get_event(&valid_input());
//!     let request_id = mock_request_id("get-valid");
//!     // ... invoke the handler
//! }
//! ```

use serde_json::{json, Value};

/// Device UUID accepted by the schema.
pub const TEST_DEVICE_UUID: &str = "abeabeab-eabe-abea-beab-abeabeabeabe";

/// Transaction id accepted by the schema.
pub const TEST_TX_ID: &str = "test_txId_from_valid_lambda_req";

/// A valid `{deviceUuid, txId}` input object.
pub fn valid_input() -> Value {
    json!({ "deviceUuid": TEST_DEVICE_UUID, "txId": TEST_TX_ID })
}

/// Copy of `input` with `key` set to `value`.
pub fn input_with(input: &Value, key: &str, value: Value) -> Value {
    let mut input = input.clone();
    input[key] = value;
    input
}

/// Copy of `input` with `key` removed.
pub fn input_without(input: &Value, key: &str) -> Value {
    let mut input = input.clone();
    if let Some(map) = input.as_object_mut() {
        map.remove(key);
    }
    input
}

/// A GET event carrying `params` as query-string parameters.
pub fn get_event(params: &Value) -> Value {
    json!({
        "httpMethod": "GET",
        "queryStringParameters": params,
        "body": null
    })
}

/// A POST event carrying `body` serialized as the JSON body string.
pub fn post_event(body: &Value) -> Value {
    raw_post_event(&body.to_string())
}

/// A POST event with an arbitrary body string, valid JSON or not.
pub fn raw_post_event(body: &str) -> Value {
    json!({
        "httpMethod": "POST",
        "queryStringParameters": null,
        "body": body
    })
}

/// Create a mock request ID for testing.
///
/// Since `lambda_runtime::Context` is non-exhaustive, tests log and assert on
/// the request ID directly.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HelloRequest;

    #[test]
    fn valid_input_passes_validation() {
        assert!(HelloRequest::from_raw(&valid_input()).is_ok());
    }

    #[test]
    fn input_helpers_modify_copies() {
        let base = valid_input();
        let changed = input_with(&base, "txId", json!(""));
        let removed = input_without(&base, "deviceUuid");

        assert_eq!(base["txId"], TEST_TX_ID);
        assert_eq!(changed["txId"], "");
        assert!(removed.get("deviceUuid").is_none());
    }

    #[test]
    fn post_event_serializes_body() {
        let event = post_event(&valid_input());
        let body: Value = serde_json::from_str(event["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, valid_input());
    }

    #[test]
    fn mock_request_id_formats_correctly() {
        assert_eq!(mock_request_id("123"), "test-request-123");
    }
}
