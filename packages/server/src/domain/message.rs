//! Chat message model and inbound submission validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// A chat message, immutable once created.
///
/// `id` is assigned by the durable store and absent when the instance
/// runs without one; it is omitted from the JSON representation in
/// that case. `created_at` is assigned exactly once, by the store in
/// persistent mode or by the ingress clock in ephemeral mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Raw inbound submission shape shared by the HTTP and WebSocket entry
/// points. Unknown fields are ignored; absent or null fields show up
/// as `None` and are rejected by [`Submission::validate`].
#[derive(Debug, Deserialize)]
pub struct Submission {
    pub author: Option<String>,
    pub text: Option<String>,
}

impl Submission {
    /// Parse a raw JSON payload into a submission.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(raw).map_err(|_| ValidationError::MalformedInput)
    }

    /// Reject submissions with a missing or empty `author` or `text`.
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        match (self.author, self.text) {
            (Some(author), Some(text)) if !author.is_empty() && !text.is_empty() => {
                Ok((author, text))
            }
            _ => Err(ValidationError::MissingField),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_submission() {
        // given:
        let raw = r#"{"author":"alice","text":"hi"}"#;

        // when:
        let submission = Submission::parse(raw).unwrap();

        // then:
        assert_eq!(submission.author.as_deref(), Some("alice"));
        assert_eq!(submission.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        // given:
        let raw = r#"{"author":"alice","text":"hi","color":"green"}"#;

        // when:
        let result = Submission::parse(raw).unwrap().validate();

        // then:
        assert_eq!(result, Ok(("alice".to_string(), "hi".to_string())));
    }

    #[test]
    fn test_parse_malformed_payload() {
        // given:
        let raw = "not json";

        // when:
        let result = Submission::parse(raw);

        // then:
        assert!(matches!(result, Err(ValidationError::MalformedInput)));
    }

    #[test]
    fn test_validate_preserves_author_and_text() {
        // given:
        let submission = Submission {
            author: Some("alice".to_string()),
            text: Some("hello world".to_string()),
        };

        // when:
        let (author, text) = submission.validate().unwrap();

        // then:
        assert_eq!(author, "alice");
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_validate_rejects_missing_author() {
        // given:
        let submission = Submission::parse(r#"{"text":"hi"}"#).unwrap();

        // when:
        let result = submission.validate();

        // then:
        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[test]
    fn test_validate_rejects_null_text() {
        // given:
        let submission = Submission::parse(r#"{"author":"alice","text":null}"#).unwrap();

        // when:
        let result = submission.validate();

        // then:
        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        // given:
        let submission = Submission {
            author: Some("".to_string()),
            text: Some("hi".to_string()),
        };

        // when:
        let result = submission.validate();

        // then:
        assert_eq!(result, Err(ValidationError::MissingField));
    }

    #[test]
    fn test_message_json_omits_absent_id() {
        // given:
        let message = Message {
            id: None,
            author: "alice".to_string(),
            text: "hi".to_string(),
            created_at: Utc::now(),
        };

        // when:
        let json = serde_json::to_value(&message).unwrap();

        // then:
        assert!(json.get("id").is_none());
        assert_eq!(json["author"], "alice");
    }

    #[test]
    fn test_message_json_includes_assigned_id() {
        // given:
        let message = Message {
            id: Some(42),
            author: "alice".to_string(),
            text: "hi".to_string(),
            created_at: Utc::now(),
        };

        // when:
        let json = serde_json::to_value(&message).unwrap();

        // then:
        assert_eq!(json["id"], 42);
    }
}
