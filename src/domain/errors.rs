//! Error types for the domain layer.
//!
//! Two families live here:
//! - [`DecodeError`] - the payload could not be turned into a usable result.
//! - [`LookupError`] - a query on an already decoded result found nothing.
//!   This is an expected outcome, not a fault.

use thiserror::Error;

/// Errors raised while turning a JSON payload into domain values.
///
/// A decode error always means "no usable result": decoders never hand back
/// a partially filled structure alongside one.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Covers syntax errors and JSON that does not fit the expected shape;
    /// see [`DecodeError::is_syntax`].
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty body")]
    EmptyBody,

    #[error("response has no results")]
    MissingResults,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}")]
    InvalidShape { field: String, expected: &'static str },

    #[error("Unknown message type: {0}")]
    UnknownMessageType(String),
}

impl DecodeError {
    /// Creates a shape error for a field.
    pub fn invalid_shape(field: impl Into<String>, expected: &'static str) -> Self {
        DecodeError::InvalidShape {
            field: field.into(),
            expected,
        }
    }

    /// Returns true when the body is not well-formed JSON at all.
    pub fn is_syntax(&self) -> bool {
        matches!(self, DecodeError::Json(err) if err.is_syntax() || err.is_eof())
    }
}

/// Lookups on a decoded response that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no intent matched")]
    NoIntent,

    #[error("no entity matching {0}")]
    NoEntity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_messages_name_the_missing_kind() {
        assert_eq!(LookupError::NoIntent.to_string(), "no intent matched");
        assert_eq!(
            LookupError::NoEntity("fake_entity".to_string()).to_string(),
            "no entity matching fake_entity"
        );
    }

    #[test]
    fn unknown_message_type_mentions_tag() {
        let err = DecodeError::UnknownMessageType("bogus".to_string());
        assert_eq!(err.to_string(), "Unknown message type: bogus");
    }

    #[test]
    fn invalid_shape_helper_builds_variant() {
        let err = DecodeError::invalid_shape("entities", "an object");
        assert!(matches!(
            err,
            DecodeError::InvalidShape { ref field, expected: "an object" } if field == "entities"
        ));
    }

    #[test]
    fn json_errors_tell_syntax_from_data() {
        let syntax: DecodeError = serde_json::from_str::<String>("{").unwrap_err().into();
        assert!(syntax.is_syntax());
        assert!(syntax.to_string().starts_with("JSON decode failed: "));

        let data: DecodeError = serde_json::from_str::<String>("null").unwrap_err().into();
        assert!(!data.is_syntax());
        assert!(data.to_string().contains("invalid type: null"));
    }
}
