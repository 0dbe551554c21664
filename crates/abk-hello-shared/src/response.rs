//! Response body, status codes and the API Gateway proxy response envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome marker carried in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMsg {
    Ok,
    Error,
}

impl ResponseMsg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// JSON body returned to the caller: `{"msg": "ok"|"error", "txId": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub msg: ResponseMsg,

    /// Echoed transaction id. Empty when none could be recovered.
    pub tx_id: String,
}

impl ResponseBody {
    /// Success body echoing the validated transaction id.
    pub fn ok(tx_id: impl Into<String>) -> Self {
        Self {
            msg: ResponseMsg::Ok,
            tx_id: tx_id.into(),
        }
    }

    /// Error body with whatever transaction id could be recovered.
    pub fn error(tx_id: impl Into<String>) -> Self {
        Self {
            msg: ResponseMsg::Error,
            tx_id: tx_id.into(),
        }
    }

    /// Flat two-field mapping, in `msg`, `txId` order.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("msg".to_string(), Value::from(self.msg.as_str()));
        map.insert("txId".to_string(), Value::from(self.tx_id.as_str()));
        map
    }

    /// Serialize the body to its JSON string via [`ResponseBody::to_map`].
    pub fn to_json(&self) -> String {
        Value::Object(self.to_map()).to_string()
    }
}

/// Status codes this endpoint knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelloStatus {
    Ok,
    Forbidden,
    /// Reserved; no current code path returns it.
    Conflict,
}

impl HelloStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Conflict => StatusCode::CONFLICT,
        }
    }

    pub fn as_u16(self) -> u16 {
        self.status_code().as_u16()
    }
}

/// Fixed CORS and content-type headers sent with every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,

    #[serde(rename = "Access-Control-Allow-Credentials")]
    pub allow_credentials: bool,

    #[serde(rename = "Content-Type")]
    pub content_type: String,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_credentials: true,
            content_type: "application/json".to_string(),
        }
    }
}

/// API Gateway proxy integration response.
///
/// # Example
///
/// ```
/// use abk_hello_shared::{ApiGatewayResponse, HelloStatus, ResponseBody};
///
/// let response = ApiGatewayResponse::new(HelloStatus::Ok, &ResponseBody::ok("t1"));
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body, r#"{"msg":"ok","txId":"t1"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayResponse {
    pub status_code: u16,
    pub headers: ResponseHeaders,
    /// JSON-encoded [`ResponseBody`].
    pub body: String,
}

impl ApiGatewayResponse {
    /// Build a response with the fixed header set.
    pub fn new(status: HelloStatus, body: &ResponseBody) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: ResponseHeaders::default(),
            body: body.to_json(),
        }
    }

    /// Parse the body back into a [`ResponseBody`].
    pub fn parsed_body(&self) -> serde_json::Result<ResponseBody> {
        serde_json::from_str(&self.body)
    }
}
