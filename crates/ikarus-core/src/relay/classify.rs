//! Upstream failure classification.
//!
//! Classification reads the error's message text rather than its variant or
//! any structured code: a message mentioning "API key" is an authentication
//! problem, one mentioning "Rate limit" is throttling, everything else is a
//! generic upstream failure. Matching is case-sensitive.

use ikarus_types::error::RelayError;
use ikarus_types::llm::LlmError;

const AUTH_MARKER: &str = "API key";
const RATE_LIMIT_MARKER: &str = "Rate limit";

/// Map a provider failure to the relay's error taxonomy.
pub fn classify_upstream_error(err: &LlmError) -> RelayError {
    let message = err.to_string();

    if message.contains(AUTH_MARKER) {
        RelayError::Authentication
    } else if message.contains(RATE_LIMIT_MARKER) {
        RelayError::RateLimited
    } else {
        RelayError::Upstream(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(message: &str) -> LlmError {
        LlmError::Provider {
            message: message.to_string(),
            code: None,
        }
    }

    #[test]
    fn api_key_message_is_authentication() {
        let err = provider("Incorrect API key provided: sk-abc***. You can find your API key at ...");
        assert_eq!(classify_upstream_error(&err), RelayError::Authentication);
    }

    #[test]
    fn rate_limit_message_is_rate_limited() {
        let err = provider("Rate limit reached for gpt-3.5-turbo in organization org-x on requests per min");
        assert_eq!(classify_upstream_error(&err), RelayError::RateLimited);
    }

    #[test]
    fn api_key_wins_over_rate_limit() {
        let err = provider("Rate limit exceeded for this API key");
        assert_eq!(classify_upstream_error(&err), RelayError::Authentication);
    }

    #[test]
    fn structured_code_is_not_consulted() {
        let err = LlmError::Provider {
            message: "Too many requests".to_string(),
            code: Some("rate_limit_exceeded".to_string()),
        };
        assert_eq!(
            classify_upstream_error(&err),
            RelayError::Upstream("Too many requests".to_string())
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let err = provider("rate limit hit");
        assert!(matches!(classify_upstream_error(&err), RelayError::Upstream(_)));
    }

    #[test]
    fn other_errors_surface_their_message() {
        let err = LlmError::Transport("connection reset by peer".to_string());
        assert_eq!(
            classify_upstream_error(&err),
            RelayError::Upstream("transport error: connection reset by peer".to_string())
        );
    }

    #[test]
    fn empty_completion_is_upstream() {
        assert_eq!(
            classify_upstream_error(&LlmError::EmptyCompletion),
            RelayError::Upstream("completion returned no content".to_string())
        );
    }

    #[test]
    fn transport_errors_mentioning_api_key_still_classify() {
        let err = LlmError::Transport("missing API key header".to_string());
        assert_eq!(classify_upstream_error(&err), RelayError::Authentication);
    }
}
