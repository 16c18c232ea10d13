//! RelayService -- one submission in, one normalized result out.

use tracing::{Instrument, debug, field, info, info_span, warn};

use ikarus_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS,
};
use ikarus_types::chat::{ChatReply, ChatRequest};
use ikarus_types::error::RelayError;
use ikarus_types::llm::LlmError;

use crate::llm::box_provider::BoxLlmProvider;
use crate::persona::build_completion_request;

use super::classify::classify_upstream_error;

/// Forwards user submissions to the completion API.
///
/// Constructed once at start-up and shared read-only. `provider` is `None`
/// when no credential was available, in which case every call fails with
/// [`RelayError::MissingCredential`] without touching the network.
pub struct RelayService {
    provider: Option<BoxLlmProvider>,
    model: String,
}

impl RelayService {
    pub fn new(provider: Option<BoxLlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Fail fast when the relay was started without a credential.
    pub fn ensure_configured(&self) -> Result<&BoxLlmProvider, RelayError> {
        self.provider.as_ref().ok_or_else(|| {
            warn!("chat request rejected: completion API credential is not configured");
            RelayError::MissingCredential
        })
    }

    /// Relay one submission.
    ///
    /// Order: configuration, input validation, exactly one upstream call.
    pub async fn relay(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let provider = self.ensure_configured()?;

        let Some(user_input) = request.input() else {
            warn!("chat request rejected: no input provided");
            return Err(RelayError::MissingInput);
        };

        debug!(chars = user_input.chars().count(), "relaying user input");
        let completion = build_completion_request(&self.model, user_input);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "chat",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %completion.model,
            gen_ai.request.max_tokens = completion.max_tokens,
            gen_ai.request.temperature = ?completion.temperature,
            gen_ai.response.id = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );

        let outcome = provider
            .complete(&completion)
            .instrument(span.clone())
            .await
            .and_then(|response| {
                span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
                if let Some(reason) = response.finish_reason.as_deref() {
                    span.record(GEN_AI_RESPONSE_FINISH_REASONS, reason);
                }
                span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
                span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);

                if response.content.is_empty() {
                    Err(LlmError::EmptyCompletion)
                } else {
                    Ok(response.content)
                }
            });

        match outcome {
            Ok(message) => {
                info!(provider = provider.name(), "completion received");
                Ok(ChatReply { message })
            }
            Err(err) => {
                let classified = classify_upstream_error(&err);
                let code = match &err {
                    LlmError::Provider { code, .. } => code.as_deref(),
                    _ => None,
                };
                warn!(
                    error = %err,
                    upstream_code = ?code,
                    kind = %classified.kind(),
                    "completion failed"
                );
                Err(classified)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::llm::provider::LlmProvider;
    use crate::persona::IKARUS_PERSONA;
    use ikarus_types::llm::{CompletionRequest, CompletionResponse, MessageRole, Usage};

    // --- Mock provider ---

    #[derive(Clone)]
    enum MockResult {
        Success(String),
        Error(String),
    }

    struct MockProvider {
        result: MockResult,
        calls: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockProvider {
        fn new(result: MockResult) -> (Self, Arc<Mutex<Vec<CompletionRequest>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    result,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.lock().unwrap().push(request.clone());
            match self.result.clone() {
                MockResult::Success(content) => Ok(CompletionResponse {
                    id: "resp-1".to_string(),
                    content,
                    model: request.model.clone(),
                    finish_reason: Some("stop".to_string()),
                    usage: Usage {
                        input_tokens: 12,
                        output_tokens: 34,
                    },
                }),
                MockResult::Error(message) => Err(LlmError::Provider {
                    message,
                    code: None,
                }),
            }
        }
    }

    fn service(result: MockResult) -> (RelayService, Arc<Mutex<Vec<CompletionRequest>>>) {
        let (provider, calls) = MockProvider::new(result);
        (
            RelayService::new(Some(BoxLlmProvider::new(provider)), "gpt-3.5-turbo"),
            calls,
        )
    }

    #[tokio::test]
    async fn success_returns_completion_text() {
        let (svc, calls) = service(MockResult::Success("The sun remembers.".into()));
        let reply = svc
            .relay(&ChatRequest::new("Tell me about the Trials of Ignis"))
            .await
            .unwrap();
        assert_eq!(reply.message, "The sun remembers.");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let sent = &calls[0];
        assert_eq!(sent.system.as_deref(), Some(IKARUS_PERSONA));
        assert_eq!(sent.temperature, Some(0.7));
        assert_eq!(sent.max_tokens, 500);
        assert_eq!(sent.model, "gpt-3.5-turbo");
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].role, MessageRole::User);
        assert_eq!(sent.messages[0].content, "Tell me about the Trials of Ignis");
    }

    #[tokio::test]
    async fn calls_are_independent() {
        let (svc, calls) = service(MockResult::Success("ok".into()));
        svc.relay(&ChatRequest::new("first")).await.unwrap();
        svc.relay(&ChatRequest::new("second")).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].messages.len(), 1);
        assert_eq!(calls[1].messages[0].content, "second");
        assert_eq!(calls[0].system, calls[1].system);
    }

    #[tokio::test]
    async fn empty_input_is_rejected_without_upstream_call() {
        let (svc, calls) = service(MockResult::Success("unused".into()));
        let err = svc.relay(&ChatRequest::new("")).await.unwrap_err();
        assert_eq!(err, RelayError::MissingInput);
        assert_eq!(err.status_code(), 400);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_input_is_rejected_without_upstream_call() {
        let (svc, calls) = service(MockResult::Success("unused".into()));
        let err = svc.relay(&ChatRequest::default()).await.unwrap_err();
        assert_eq!(err, RelayError::MissingInput);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_relay_fails_every_request() {
        let svc = RelayService::new(None, "gpt-3.5-turbo");
        assert!(!svc.is_configured());

        for input in ["hello", "", "Tell me about Solar Weaving"] {
            let err = svc.relay(&ChatRequest::new(input)).await.unwrap_err();
            assert_eq!(err, RelayError::MissingCredential);
            assert_eq!(err.status_code(), 500);
        }
    }

    #[tokio::test]
    async fn api_key_failure_maps_to_401() {
        let (svc, calls) = service(MockResult::Error("Incorrect API key provided".into()));
        let err = svc.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(err, RelayError::Authentication);
        assert_eq!(err.status_code(), 401);
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rate_limit_failure_maps_to_429() {
        let (svc, _) = service(MockResult::Error("Rate limit reached for requests".into()));
        let err = svc.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(err, RelayError::RateLimited);
        assert_eq!(err.status_code(), 429);
    }

    #[tokio::test]
    async fn other_failure_maps_to_500_with_detail() {
        let (svc, _) = service(MockResult::Error("The server had an error".into()));
        let err = svc.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.details(), "The server had an error");
    }

    #[tokio::test]
    async fn empty_completion_is_a_failure() {
        let (svc, _) = service(MockResult::Success(String::new()));
        let err = svc.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(
            err,
            RelayError::Upstream("completion returned no content".into())
        );
    }
}
