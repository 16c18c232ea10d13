//! Configuration types for the Ikarus relay.
//!
//! `IkarusConfig` represents the optional `ikarus.toml`. Every field has a
//! default, so an empty or missing file yields a working local setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IkarusConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Echo permissive CORS headers and answer pre-flight requests.
    #[serde(default = "default_cors")]
    pub cors: bool,
    /// Ceiling on a single request, upstream call included.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Completion API settings.
///
/// The credential itself never lives here; only the name of the environment
/// variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Client Relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Hosted deployment, e.g. `ikarus.example.app`. When set the client
    /// talks to `https://<host>/api/chat`.
    #[serde(default)]
    pub deployment_host: Option<String>,
    /// Origin the chat path is joined to when no deployment host is set.
    #[serde(default = "default_local_origin")]
    pub local_origin: String,
}

fn default_local_origin() -> String {
    "http://127.0.0.1:3000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            deployment_host: None,
            local_origin: default_local_origin(),
        }
    }
}
