//! Error taxonomy for request extraction and validation.

use serde_json::Value;
use thiserror::Error;

/// Convenient result alias for request validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reasons a request can be rejected before a response body is built.
///
/// Messages use JSON Schema validator wording so log lines identify both the
/// offending field and the violated rule.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A key outside the schema was present.
    #[error("Additional properties are not allowed ('{property}' was unexpected)")]
    AdditionalProperty { property: String },

    /// A required key was absent.
    #[error("'{property}' is a required property")]
    RequiredPropertyMissing { property: String },

    /// The value had the wrong JSON type.
    #[error("{} is not of type '{expected}'", describe(.value))]
    TypeMismatch {
        property: Option<String>,
        value: Value,
        expected: &'static str,
    },

    /// A pattern-constrained string did not match.
    #[error("{} does not match '{pattern}'", describe(.value))]
    PatternMismatch {
        property: String,
        value: Value,
        pattern: &'static str,
    },

    /// A string was shorter than its minimum length.
    #[error("{}", too_short_message(.value, .min))]
    TooShort {
        property: String,
        value: Value,
        min: usize,
    },

    /// A string was longer than its maximum length.
    #[error("{} is too long", describe(.value))]
    TooLong {
        property: String,
        value: Value,
        max: usize,
    },

    /// The event body was present but was not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Anything else that went wrong while reading the event.
    #[error("unexpected fault: {0}")]
    UnknownFault(String),
}

impl ValidationError {
    /// The field the error refers to, when there is one.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::AdditionalProperty { property }
            | Self::RequiredPropertyMissing { property }
            | Self::PatternMismatch { property, .. }
            | Self::TooShort { property, .. }
            | Self::TooLong { property, .. } => Some(property),
            Self::TypeMismatch { property, .. } => property.as_deref(),
            Self::MalformedBody(_) | Self::UnknownFault(_) => None,
        }
    }

    /// Stable category label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AdditionalProperty { .. } => "additional_property",
            Self::RequiredPropertyMissing { .. } => "required_property_missing",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::PatternMismatch { .. } => "pattern_mismatch",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::MalformedBody(_) => "malformed_body",
            Self::UnknownFault(_) => "unknown_fault",
        }
    }
}

/// Render a JSON value for an error message: strings single-quoted, anything
/// else in compact JSON form.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

fn too_short_message(value: &Value, min: &usize) -> String {
    if *min == 1 {
        format!("{} should be non-empty", describe(value))
    } else {
        format!("{} is too short", describe(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_property_message() {
        let err = ValidationError::RequiredPropertyMissing {
            property: "txId".to_string(),
        };
        assert_eq!(err.to_string(), "'txId' is a required property");
        assert_eq!(err.property(), Some("txId"));
        assert_eq!(err.kind(), "required_property_missing");
    }

    #[test]
    fn test_additional_property_message() {
        let err = ValidationError::AdditionalProperty {
            property: "extra".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Additional properties are not allowed ('extra' was unexpected)"
        );
    }

    #[test]
    fn test_type_mismatch_renders_non_strings_as_json() {
        let cases = [
            (json!(true), "true is not of type 'string'"),
            (json!(89), "89 is not of type 'string'"),
            (json!(2.5), "2.5 is not of type 'string'"),
            (json!({}), "{} is not of type 'string'"),
            (json!([]), "[] is not of type 'string'"),
        ];
        for (value, expected) in cases {
            let err = ValidationError::TypeMismatch {
                property: Some("deviceUuid".to_string()),
                value,
                expected: "string",
            };
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_too_short_wording_depends_on_minimum() {
        let empty = ValidationError::TooShort {
            property: "txId".to_string(),
            value: json!(""),
            min: 1,
        };
        assert_eq!(empty.to_string(), "'' should be non-empty");

        let short = ValidationError::TooShort {
            property: "code".to_string(),
            value: json!("ab"),
            min: 3,
        };
        assert_eq!(short.to_string(), "'ab' is too short");
    }

    #[test]
    fn test_malformed_body_has_no_property() {
        let parse_err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let err = ValidationError::from(parse_err);
        assert!(err.property().is_none());
        assert_eq!(err.kind(), "malformed_body");
        assert!(err.to_string().contains("not valid JSON"));
    }
}
