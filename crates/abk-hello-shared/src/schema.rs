//! Fixed structural schema for hello requests.
//!
//! Input arrives as untrusted JSON, either query-string parameters or a parsed
//! body, so every value is checked against its runtime JSON type before it is
//! copied into a typed [`HelloRequest`](crate::HelloRequest).
//!
//! When several rules are broken at once the first failure is reported in this
//! order:
//!
//! 1. the input is not a JSON object;
//! 2. an additional property is present (first unexpected key in key order);
//! 3. a required property is missing (schema order);
//! 4. per-property checks in schema order: type first, then pattern and length.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};

/// Field name carrying the device identifier.
pub const DEVICE_UUID: &str = "deviceUuid";

/// Field name carrying the caller's transaction identifier.
pub const TX_ID: &str = "txId";

/// Lowercase canonical UUID pattern.
pub const UUID_PATTERN: &str =
    "^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

/// Length of a canonical UUID string.
pub const UUID_LENGTH: usize = 36;

/// Maximum accepted transaction id length.
pub const TX_ID_MAX_LENGTH: usize = 36;

static UUID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(UUID_PATTERN).expect("UUID pattern is a valid regex"));

/// Constraints on a string-typed property.
#[derive(Debug, Clone, Copy)]
pub struct StringRule {
    /// Pattern the value must match. When set, length deviations are also
    /// reported as pattern mismatches.
    pub pattern: Option<(&'static Lazy<Regex>, &'static str)>,
    /// Minimum length in characters.
    pub min_length: usize,
    /// Maximum length in characters.
    pub max_length: usize,
}

impl StringRule {
    fn check(&self, property: &str, value: &Value) -> Result<()> {
        let s = match value {
            Value::String(s) => s,
            other => {
                return Err(ValidationError::TypeMismatch {
                    property: Some(property.to_string()),
                    value: other.clone(),
                    expected: "string",
                })
            }
        };

        let len = s.chars().count();

        if let Some((regex, pattern)) = self.pattern {
            let length_ok = (self.min_length..=self.max_length).contains(&len);
            if !length_ok || !regex.is_match(s) {
                return Err(ValidationError::PatternMismatch {
                    property: property.to_string(),
                    value: value.clone(),
                    pattern,
                });
            }
            return Ok(());
        }

        if len < self.min_length {
            return Err(ValidationError::TooShort {
                property: property.to_string(),
                value: value.clone(),
                min: self.min_length,
            });
        }

        if len > self.max_length {
            return Err(ValidationError::TooLong {
                property: property.to_string(),
                value: value.clone(),
                max: self.max_length,
            });
        }

        Ok(())
    }
}

/// A named, required property and its rule.
#[derive(Debug, Clone, Copy)]
pub struct PropertyRule {
    pub name: &'static str,
    pub rule: StringRule,
}

/// Object schema: required string properties, no additional properties.
#[derive(Debug, Clone)]
pub struct RequestSchema {
    properties: Vec<PropertyRule>,
}

impl RequestSchema {
    /// The schema for `{ "deviceUuid": <uuid>, "txId": <1-36 chars> }`.
    pub fn hello() -> Self {
        Self {
            properties: vec![
                PropertyRule {
                    name: DEVICE_UUID,
                    rule: StringRule {
                        pattern: Some((&UUID_REGEX, UUID_PATTERN)),
                        min_length: UUID_LENGTH,
                        max_length: UUID_LENGTH,
                    },
                },
                PropertyRule {
                    name: TX_ID,
                    rule: StringRule {
                        pattern: None,
                        min_length: 1,
                        max_length: TX_ID_MAX_LENGTH,
                    },
                },
            ],
        }
    }

    /// Properties in schema order.
    pub fn properties(&self) -> &[PropertyRule] {
        &self.properties
    }

    /// Check `raw` against the schema without modifying it.
    pub fn validate(&self, raw: &Value) -> Result<()> {
        let object = match raw {
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::TypeMismatch {
                    property: None,
                    value: other.clone(),
                    expected: "object",
                })
            }
        };

        self.check_additional(object)?;

        for prop in &self.properties {
            if !object.contains_key(prop.name) {
                return Err(ValidationError::RequiredPropertyMissing {
                    property: prop.name.to_string(),
                });
            }
        }

        for prop in &self.properties {
            prop.rule.check(prop.name, &object[prop.name])?;
        }

        Ok(())
    }

    fn check_additional(&self, object: &Map<String, Value>) -> Result<()> {
        let unexpected = object
            .keys()
            .find(|key| !self.properties.iter().any(|p| p.name == key.as_str()));

        match unexpected {
            Some(key) => Err(ValidationError::AdditionalProperty {
                property: key.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for RequestSchema {
    fn default() -> Self {
        Self::hello()
    }
}

/// Validate `raw` against the hello schema.
pub fn validate_input(raw: &Value) -> Result<()> {
    RequestSchema::hello().validate(raw)
}
