//! Client Relay: turns one line of user text into one call to the chat
//! endpoint and reduces every outcome to a string that can be shown in the
//! terminal.
//!
//! Decision order for a response:
//! 1. the request never reached the server -> [`NETWORK_FAILURE_MESSAGE`]
//! 2. non-2xx status -> server's `error`/`details` framed as turbulence
//! 3. 2xx carrying an `error` field -> same framing
//! 4. 2xx without a usable `message` -> [`MEDITATION_MESSAGE`]
//! 5. otherwise the `message`, verbatim

use reqwest::StatusCode;
use tracing::{debug, warn};

use ikarus_types::chat::{CHAT_PATH, ChatEnvelope, ChatRequest};
use ikarus_types::config::ClientConfig;
use ikarus_types::error::ClientError;

pub const NETWORK_FAILURE_MESSAGE: &str =
    "I am unable to connect to the network. Please check your connection.";

pub const TURBULENCE_PREFIX: &str = "The solar winds are turbulent. Error: ";

pub const MEDITATION_MESSAGE: &str = "Ikarus is in meditation. Please try again in a moment.";

/// Compute the chat endpoint for this deployment.
///
/// A configured deployment host wins (`https://` is assumed unless the host
/// already names a scheme); otherwise the chat path is joined to the local
/// origin.
pub fn resolve_endpoint(config: &ClientConfig) -> String {
    let host = config
        .deployment_host
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty());

    match host {
        Some(host) if host.contains("://") => {
            format!("{}{CHAT_PATH}", host.trim_end_matches('/'))
        }
        Some(host) => format!("https://{}{CHAT_PATH}", host.trim_end_matches('/')),
        None => format!("{}{CHAT_PATH}", config.local_origin.trim_end_matches('/')),
    }
}

/// Render a failure in the persona's voice.
pub fn render_failure(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        ClientError::Rejected { reason, .. } => format!("{TURBULENCE_PREFIX}{reason}"),
        ClientError::MissingMessage => MEDITATION_MESSAGE.to_string(),
    }
}

/// HTTP client for the Server Relay.
#[derive(Clone)]
pub struct ClientRelay {
    http: reqwest::Client,
    endpoint: String,
}

impl ClientRelay {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_endpoint(resolve_endpoint(config))
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one submission and return displayable text. Never fails.
    pub async fn send(&self, user_input: &str) -> String {
        match self.exchange(user_input).await {
            Ok(message) => message,
            Err(err) => {
                warn!(endpoint = %self.endpoint, kind = %err.kind(), error = %err, "chat exchange failed");
                render_failure(&err)
            }
        }
    }

    /// Send one submission and return the server's message or the reason it
    /// could not be obtained.
    pub async fn exchange(&self, user_input: &str) -> Result<String, ClientError> {
        debug!(endpoint = %self.endpoint, "sending chat request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest::new(user_input))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "chat response received");

        let envelope = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ChatEnvelope>(&bytes).unwrap_or_else(|e| {
                debug!("response body is not a chat envelope: {e}");
                ChatEnvelope::default()
            }),
            Err(e) => {
                debug!("failed to read response body: {e}");
                ChatEnvelope::default()
            }
        };

        interpret(status, envelope)
    }
}

fn interpret(status: StatusCode, envelope: ChatEnvelope) -> Result<String, ClientError> {
    if !status.is_success() {
        let reason = rejection_reason(&envelope)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            reason,
        });
    }

    if envelope.error.is_some() {
        if let Some(reason) = rejection_reason(&envelope) {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                reason,
            });
        }
    }

    envelope
        .message
        .filter(|m| !m.is_empty())
        .ok_or(ClientError::MissingMessage)
}

/// `error`, with `details` appended in parentheses when both are present.
fn rejection_reason(envelope: &ChatEnvelope) -> Option<String> {
    let error = envelope.error.as_deref().filter(|s| !s.is_empty());
    let details = envelope.details.as_deref().filter(|s| !s.is_empty());

    match (error, details) {
        (Some(error), Some(details)) => Some(format!("{error} ({details})")),
        (Some(error), None) => Some(error.to_string()),
        (None, Some(details)) => Some(details.to_string()),
        (None, None) => None,
    }
}
