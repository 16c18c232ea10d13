//! LLM request/response types.
//!
//! These model the data shapes for a single, non-streaming chat completion:
//! the request the Server Relay builds, the response it reads back, and the
//! errors a provider can report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in an LLM conversation.
///
/// Only user turns exist: every call is a single, history-free exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
        }
    }
}

/// A single conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
///
/// The system instruction travels separately from `messages` so providers
/// can place it wherever their API expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    /// Generated text. Empty when the provider returned no content.
    pub content: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub usage: Usage,
}

/// Token usage for a completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
///
/// `Provider` displays the upstream message verbatim; callers classify
/// failures by inspecting that text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("{message}")]
    Provider {
        message: String,
        /// Structured error code when the upstream supplied one.
        code: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("completion returned no content")]
    EmptyCompletion,
}
