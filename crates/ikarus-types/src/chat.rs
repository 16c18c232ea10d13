//! Wire types for the `/api/chat` endpoint.
//!
//! ```json
//! // request
//! { "userInput": "Tell me about the Trials of Ignis" }
//! // success
//! { "message": "..." }
//! // failure
//! { "error": "Rate limit exceeded", "details": "Please try again in a moment" }
//! ```

use serde::{Deserialize, Serialize};

/// Path of the chat endpoint, relative to the server origin.
pub const CHAT_PATH: &str = "/api/chat";

/// A single user submission.
///
/// `user_input` is optional on the wire so that an absent field and an
/// empty string can both be reported as the same validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

impl ChatRequest {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: Some(user_input.into()),
        }
    }

    /// The input text when present and non-empty.
    pub fn input(&self) -> Option<&str> {
        self.user_input.as_deref().filter(|s| !s.is_empty())
    }
}

/// Successful relay result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
}

/// Failure body returned with every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Loose view of whatever the server sent back.
///
/// The Client Relay reads responses through this shape so that a body with
/// unexpected fields, missing fields or `null`s still parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_field() {
        let req = ChatRequest::new("hello");
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"userInput":"hello"}"#);
    }

    #[test]
    fn request_missing_field_parses_as_none() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_input, None);
        assert_eq!(req.input(), None);
    }

    #[test]
    fn request_empty_input_is_treated_as_absent() {
        let req: ChatRequest = serde_json::from_str(r#"{"userInput":""}"#).unwrap();
        assert_eq!(req.user_input.as_deref(), Some(""));
        assert_eq!(req.input(), None);
    }

    #[test]
    fn whitespace_input_is_kept() {
        let req = ChatRequest::new("  ");
        assert_eq!(req.input(), Some("  "));
    }

    #[test]
    fn error_body_omits_missing_details() {
        let body = ErrorBody {
            error: "No input provided".into(),
            details: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"No input provided"}"#
        );
    }

    #[test]
    fn envelope_tolerates_nulls_and_extra_fields() {
        let env: ChatEnvelope =
            serde_json::from_str(r#"{"message":null,"extra":1,"error":"boom"}"#).unwrap();
        assert!(env.message.is_none());
        assert_eq!(env.error.as_deref(), Some("boom"));
        assert!(env.details.is_none());
    }
}
