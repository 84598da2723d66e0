//! Per-field validation errors.
//!
//! The API reports rejected input as
//!
//! ```json
//! { "errors": { "email": ["has already been taken"], "password": ["is too short"] } }
//! ```
//!
//! [`ErrorsEnvelope`] matches that body and [`ValidationErrors`] is the inner
//! field-to-messages mapping handed to callers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping from field name to the ordered messages reported for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an empty set of validation errors.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Appends a message for a field.
    #[must_use]
    pub fn with_message(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.0.entry(field.into()).or_default().push(message.into());
        self
    }

    /// Messages reported for `field`, in the order the API sent them.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterates over fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no field has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the errors into `"<field> <message>"` lines.
    ///
    /// This is how the RealWorld front ends render them.
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field} {m}")))
            .collect()
    }

    /// Consumes the errors, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join("; "))
    }
}

/// Response body wrapping [`ValidationErrors`] under an `errors` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorsEnvelope {
    /// The per-field errors.
    pub errors: ValidationErrors,
}

impl ErrorsEnvelope {
    /// Parses a response body, returning `None` unless it has the `errors` shape.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_flat_map() {
        let errors = ValidationErrors::new().with_message("some-field", "error message");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "some-field": ["error message"] })
        );
    }

    #[test]
    fn test_with_message_keeps_order() {
        let errors = ValidationErrors::new()
            .with_message("password", "is too short")
            .with_message("password", "can't be blank");
        assert_eq!(
            errors.messages("password").unwrap(),
            ["is too short", "can't be blank"]
        );
        assert_eq!(errors.len(), 1);
        assert!(errors.messages("email").is_none());
    }

    #[test]
    fn test_full_messages_and_display() {
        let errors = ValidationErrors::new()
            .with_message("username", "has already been taken")
            .with_message("email", "is invalid");
        assert_eq!(
            errors.full_messages(),
            vec!["email is invalid", "username has already been taken"]
        );
        assert_eq!(
            errors.to_string(),
            "email is invalid; username has already been taken"
        );
    }

    #[test]
    fn test_envelope_parse() {
        let envelope =
            ErrorsEnvelope::parse(r#"{"errors":{"some-field":["error message"]}}"#).unwrap();
        assert_eq!(
            envelope.errors,
            ValidationErrors::new().with_message("some-field", "error message")
        );
    }

    #[test]
    fn test_envelope_parse_rejects_other_shapes() {
        assert!(ErrorsEnvelope::parse("").is_none());
        assert!(ErrorsEnvelope::parse("Internal Server Error").is_none());
        assert!(ErrorsEnvelope::parse(r#"{"error":{"message":"nope"}}"#).is_none());
        assert!(ErrorsEnvelope::parse(r#"{"errors":{"body":"not a list"}}"#).is_none());
    }

    #[test]
    fn test_empty() {
        let errors = ValidationErrors::default();
        assert!(errors.is_empty());
        assert!(errors.full_messages().is_empty());
        assert!(errors.into_inner().is_empty());
    }
}
