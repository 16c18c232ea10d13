//! OpenAI-compatible completion provider.
//!
//! Uses [`async_openai`] for type-safe request/response handling. Any API
//! that speaks the chat-completions protocol works through `base_url`.

pub mod config;

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use backoff::ExponentialBackoff;
use secrecy::ExposeSecret;

use ikarus_core::llm::provider::LlmProvider;
use ikarus_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat-completions API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config).with_backoff(single_attempt()),
            provider_name: config.provider_name,
            model: config.model,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
            };
            messages.push(oai_msg);
        }

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let first = response.choices.first();

        let content = first
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let finish_reason = first
            .and_then(|c| c.finish_reason.as_ref())
            .map(|fr| {
                match fr {
                    FinishReason::Stop => "stop",
                    FinishReason::Length => "length",
                    FinishReason::ToolCalls => "tool_calls",
                    FinishReason::ContentFilter => "content_filter",
                    FinishReason::FunctionCall => "function_call",
                }
                .to_string()
            });

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            finish_reason,
            usage,
        })
    }
}

/// Backoff policy that gives up after the first failure.
///
/// `async_openai` otherwise retries 429 and 5xx responses for up to 15
/// minutes; the relay makes exactly one upstream call per submission.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..ExponentialBackoff::default()
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
///
/// API errors keep the upstream message verbatim (e.g. "Incorrect API key
/// provided: ..." or "Rate limit reached for ..."), since the relay
/// classifies failures by that text.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match err {
        OpenAIError::ApiError(api_err) => LlmError::Provider {
            message: api_err.message,
            code: api_err.code,
        },
        OpenAIError::Reqwest(reqwest_err) => LlmError::Transport(reqwest_err.to_string()),
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg),
        other => LlmError::Provider {
            message: other.to_string(),
            code: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::StatusCode;
    use secrecy::SecretString;
    use serde_json::{Value, json};

    use super::*;
    use ikarus_core::llm::box_provider::BoxLlmProvider;
    use ikarus_core::relay::RelayService;
    use ikarus_types::chat::ChatRequest;
    use ikarus_types::error::RelayError;
    use ikarus_types::llm::Message;

    fn provider() -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key: SecretString::from("sk-test"),
            model: "gpt-3.5-turbo".into(),
        })
    }

    fn request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.into(),
            messages: vec![Message::user("Who taught you to fly?")],
            system: Some("You are Ikarus.".into()),
            max_tokens: 500,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn system_message_comes_first() {
        let req = provider().build_request(&request("gpt-3.5-turbo"));
        assert_eq!(req.messages.len(), 2);
        match &req.messages[0] {
            ChatCompletionRequestMessage::System(m) => match &m.content {
                ChatCompletionRequestSystemMessageContent::Text(t) => {
                    assert_eq!(t, "You are Ikarus.")
                }
                _ => panic!("expected text system content"),
            },
            _ => panic!("expected system message first"),
        }
        match &req.messages[1] {
            ChatCompletionRequestMessage::User(m) => match &m.content {
                ChatCompletionRequestUserMessageContent::Text(t) => {
                    assert_eq!(t, "Who taught you to fly?")
                }
                _ => panic!("expected text user content"),
            },
            _ => panic!("expected user message second"),
        }
    }

    #[test]
    fn sampling_parameters_are_forwarded() {
        let req = provider().build_request(&request("gpt-3.5-turbo"));
        assert_eq!(req.max_completion_tokens, Some(500));
        assert_eq!(req.temperature, Some(0.7_f32));
        assert_eq!(req.model, "gpt-3.5-turbo");
    }

    #[test]
    fn blank_model_falls_back_to_configured() {
        let req = provider().build_request(&request(""));
        assert_eq!(req.model, "gpt-3.5-turbo");
    }

    #[test]
    fn invalid_argument_maps_to_invalid_request() {
        let err = map_openai_error(async_openai::error::OpenAIError::InvalidArgument(
            "bad".into(),
        ));
        assert!(matches!(err, LlmError::InvalidRequest(ref m) if m == "bad"));
    }

    #[test]
    fn provider_name() {
        assert_eq!(provider().name(), "openai");
    }

    // --- over the wire ---

    /// Chat-completions endpoint that always answers `status` with `body`,
    /// counting how often it is hit.
    async fn upstream(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = axum::Router::new().route(
            "/v1/chat/completions",
            axum::routing::post(move || {
                let counter = Arc::clone(&counter);
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, axum::Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/v1"), hits)
    }

    fn provider_at(base_url: String) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: "openai".into(),
            base_url,
            api_key: SecretString::from("sk-test"),
            model: "gpt-3.5-turbo".into(),
        })
    }

    fn api_error(message: &str, kind: &str, code: &str) -> Value {
        json!({
            "error": { "message": message, "type": kind, "param": null, "code": code }
        })
    }

    async fn complete_once(provider: &OpenAiCompatibleProvider) -> Result<CompletionResponse, LlmError> {
        tokio::time::timeout(Duration::from_secs(5), provider.complete(&request("")))
            .await
            .expect("provider kept retrying")
    }

    #[tokio::test]
    async fn rate_limit_is_not_retried() {
        let (base, hits) = upstream(
            StatusCode::TOO_MANY_REQUESTS,
            api_error("Rate limit reached for requests", "requests", "rate_limit_exceeded"),
        )
        .await;

        let err = complete_once(&provider_at(base)).await.unwrap_err();
        match err {
            LlmError::Provider { message, code } => {
                assert_eq!(message, "Rate limit reached for requests");
                assert_eq!(code.as_deref(), Some("rate_limit_exceeded"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let (base, hits) = upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            api_error("The server had an error while processing your request", "server_error", "server_error"),
        )
        .await;

        let err = complete_once(&provider_at(base)).await.unwrap_err();
        match err {
            LlmError::Provider { message, .. } => {
                assert!(message.contains("The server had an error while processing your request"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_key_message_survives_to_the_relay() {
        let message = "Incorrect API key provided: sk-test. You can find your API key at https://platform.openai.com/account/api-keys.";
        let (base, hits) = upstream(
            StatusCode::UNAUTHORIZED,
            api_error(message, "invalid_request_error", "invalid_api_key"),
        )
        .await;
        let provider = provider_at(base);

        let err = complete_once(&provider).await.unwrap_err();
        assert!(
            matches!(&err, LlmError::Provider { message: m, code: Some(c) } if m == message && c == "invalid_api_key")
        );

        let relay = RelayService::new(Some(BoxLlmProvider::new(provider)), "gpt-3.5-turbo");
        let err = relay.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(err, RelayError::Authentication);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rate_limit_reaches_the_relay_as_429() {
        let (base, hits) = upstream(
            StatusCode::TOO_MANY_REQUESTS,
            api_error("Rate limit reached for requests", "requests", "rate_limit_exceeded"),
        )
        .await;
        let relay = RelayService::new(
            Some(BoxLlmProvider::new(provider_at(base))),
            "gpt-3.5-turbo",
        );

        let err = tokio::time::timeout(Duration::from_secs(5), relay.relay(&ChatRequest::new("hi")))
            .await
            .expect("relay kept retrying")
            .unwrap_err();
        assert_eq!(err, RelayError::RateLimited);
        assert_eq!(err.status_code(), 429);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn null_content_is_an_empty_completion() {
        let (base, hits) = upstream(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1_700_000_000,
                "model": "gpt-3.5-turbo",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": null },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 10, "completion_tokens": 0, "total_tokens": 10 }
            }),
        )
        .await;
        let provider = provider_at(base);

        let response = complete_once(&provider).await.unwrap();
        assert!(response.content.is_empty());
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.input_tokens, 10);

        let relay = RelayService::new(Some(BoxLlmProvider::new(provider)), "gpt-3.5-turbo");
        let err = relay.relay(&ChatRequest::new("hi")).await.unwrap_err();
        assert_eq!(
            err,
            RelayError::Upstream("completion returned no content".into())
        );
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
