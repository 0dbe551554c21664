//! Incoming API Gateway event and raw input extraction.
//!
//! GET requests carry their input in the query string; every other request
//! carries it as a JSON body. The same rule is used to recover a `txId` for
//! error responses.

use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::schema::TX_ID;

/// Read-only view of an API Gateway proxy event.
///
/// Fields are looked up only when the extraction rule needs them, so a
/// malformed field on a branch that is not taken does not reject the event.
/// Other event fields (`headers`, `requestContext`, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelloEvent<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> HelloEvent<'a> {
    /// Wrap a raw Lambda payload. Fails only when the payload is not an object.
    pub fn from_payload(payload: &'a Value) -> Result<Self> {
        match payload {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ValidationError::UnknownFault(format!(
                "event is not an object: {}",
                other
            ))),
        }
    }

    /// The HTTP method, when it is a string.
    pub fn http_method(&self) -> Option<&'a str> {
        self.fields.get("httpMethod").and_then(Value::as_str)
    }

    /// Whether the event was a GET request. A non-string method is not GET.
    pub fn is_get(&self) -> bool {
        self.http_method() == Some("GET")
    }

    /// Query-string parameters, when present and non-empty.
    pub fn query_string_parameters(&self) -> Option<&'a Value> {
        self.fields
            .get("queryStringParameters")
            .filter(|params| is_present(params))
    }

    /// The body, when present and non-empty.
    pub fn body(&self) -> Option<&'a Value> {
        self.fields.get("body").filter(|body| is_present(body))
    }

    /// Extract the raw input to validate.
    ///
    /// GET with non-empty query parameters uses the parameters; otherwise a
    /// non-empty body is parsed as JSON; otherwise the input is an empty object.
    pub fn extract_input(&self) -> Result<Value> {
        if self.is_get() {
            if let Some(params) = self.query_string_parameters() {
                return Ok(params.clone());
            }
        }

        match self.body() {
            Some(Value::String(body)) => Ok(serde_json::from_str(body)?),
            Some(other) => Err(ValidationError::UnknownFault(format!(
                "body is not a string: {}",
                other
            ))),
            None => Ok(Value::Object(Map::new())),
        }
    }
}

/// Null, `false`, zero and empty strings, arrays and objects count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Best-effort recovery of the caller's `txId` for an error response.
///
/// Re-reads the event with the same extraction rule. Any failure, or a `txId`
/// that is not a string, yields an empty string.
pub fn recover_tx_id(payload: &Value) -> String {
    HelloEvent::from_payload(payload)
        .and_then(|event| event.extract_input())
        .ok()
        .and_then(|input| match input.get(TX_ID) {
            Some(Value::String(tx_id)) => Some(tx_id.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_uses_query_parameters() {
        let payload = json!({
            "httpMethod": "GET",
            "queryStringParameters": { "deviceUuid": "abc", "txId": "t1" },
            "body": "{\"txId\": \"from-body\"}"
        });
        let input = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap();
        assert_eq!(input["txId"], "t1");
    }

    #[test]
    fn test_get_without_query_falls_back_to_body() {
        let payload = json!({
            "httpMethod": "GET",
            "queryStringParameters": {},
            "body": "{\"txId\": \"from-body\"}"
        });
        let input = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap();
        assert_eq!(input["txId"], "from-body");
    }

    #[test]
    fn test_post_ignores_query_parameters() {
        let payload = json!({
            "httpMethod": "POST",
            "queryStringParameters": { "txId": "from-query" },
            "body": "{\"txId\": \"from-body\"}"
        });
        let input = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap();
        assert_eq!(input["txId"], "from-body");
    }

    #[test]
    fn test_empty_event_yields_empty_object() {
        for payload in [json!({ "httpMethod": "GET" }), json!({ "body": "" })] {
            let event = HelloEvent::from_payload(&payload).unwrap();
            assert_eq!(event.extract_input().unwrap(), json!({}));
        }
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let payload = json!({
            "httpMethod": "POST",
            "queryStringParameters": null,
            "body": null
        });
        let event = HelloEvent::from_payload(&payload).unwrap();
        assert_eq!(event.http_method(), Some("POST"));
        assert!(event.query_string_parameters().is_none());
        assert!(event.body().is_none());
        assert_eq!(event.extract_input().unwrap(), json!({}));
    }

    #[test]
    fn test_post_ignores_malformed_query_parameters() {
        let payload = json!({
            "httpMethod": "POST",
            "queryStringParameters": "a=b",
            "body": "{\"txId\": \"t9\"}"
        });
        let input = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap();
        assert_eq!(input, json!({ "txId": "t9" }));
    }

    #[test]
    fn test_non_string_method_is_not_get() {
        let payload = json!({
            "httpMethod": 5,
            "queryStringParameters": { "txId": "from-query" },
            "body": "{\"txId\": \"t9\"}"
        });
        let event = HelloEvent::from_payload(&payload).unwrap();
        assert!(event.http_method().is_none());
        assert!(!event.is_get());
        assert_eq!(event.extract_input().unwrap()["txId"], "t9");
    }

    #[test]
    fn test_get_with_non_object_query_passes_it_through() {
        let payload = json!({ "httpMethod": "GET", "queryStringParameters": "a=b" });
        let input = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap();
        assert_eq!(input, json!("a=b"));
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let payload = json!({ "body": "{not json" });
        let event = HelloEvent::from_payload(&payload).unwrap();
        let err = event.extract_input().unwrap_err();
        assert!(matches!(err, ValidationError::MalformedBody(_)));
    }

    #[test]
    fn test_unreadable_event_is_unknown_fault() {
        let err = HelloEvent::from_payload(&json!(42)).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownFault(_)));

        let payload = json!({ "body": 42 });
        let err = HelloEvent::from_payload(&payload)
            .unwrap()
            .extract_input()
            .unwrap_err();
        assert_eq!(err.kind(), "unknown_fault");
    }

    #[test]
    fn test_recover_tx_id_from_body() {
        let payload = json!({ "httpMethod": "POST", "body": "{\"txId\": \"t1\"}" });
        assert_eq!(recover_tx_id(&payload), "t1");
    }

    #[test]
    fn test_recover_tx_id_from_query() {
        let payload = json!({
            "httpMethod": "GET",
            "queryStringParameters": { "txId": "t2", "extra": "x" }
        });
        assert_eq!(recover_tx_id(&payload), "t2");
    }

    #[test]
    fn test_recover_tx_id_swallows_failures() {
        assert_eq!(recover_tx_id(&json!({ "body": "{not json" })), "");
        assert_eq!(recover_tx_id(&json!({ "body": "[1, 2]" })), "");
        assert_eq!(recover_tx_id(&json!({ "body": "{\"txId\": 5}" })), "");
        assert_eq!(recover_tx_id(&json!("not an event")), "");
        assert_eq!(recover_tx_id(&json!({})), "");
    }

    #[test]
    fn test_recover_tx_id_ignores_unused_malformed_fields() {
        let payload = json!({
            "httpMethod": 5,
            "queryStringParameters": "a=b",
            "body": "{\"txId\": \"t9\", \"extra\": 1}"
        });
        assert_eq!(recover_tx_id(&payload), "t9");
    }
}
