//! Typed request model for the hello endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::schema::RequestSchema;

/// A request that has passed schema validation.
///
/// Only built through [`HelloRequest::from_raw`], so `device_uuid` always
/// matches the UUID pattern and `tx_id` is 1 to 36 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HelloRequest {
    /// Device identifier, a lowercase canonical UUID.
    pub device_uuid: String,

    /// Caller's transaction id, echoed back on success.
    pub tx_id: String,
}

impl HelloRequest {
    /// Validate raw input against the hello schema and copy out its fields.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        RequestSchema::hello().validate(raw)?;
        Self::deserialize(raw).map_err(|e| ValidationError::UnknownFault(e.to_string()))
    }
}

impl TryFrom<&Value> for HelloRequest {
    type Error = ValidationError;

    fn try_from(raw: &Value) -> Result<Self> {
        Self::from_raw(raw)
    }
}
