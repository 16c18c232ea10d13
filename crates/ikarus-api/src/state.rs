//! Application state for the Server Relay.
//!
//! The credential is read once here; handlers only ever see the
//! `RelayService` built from it.

use std::sync::Arc;

use ikarus_core::relay::RelayService;
use ikarus_infra::llm::create_provider;
use ikarus_infra::secret::env::EnvSecretProvider;
use ikarus_types::config::IkarusConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
}

impl AppState {
    pub fn new(relay: RelayService) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }

    /// Resolve the credential and build the relay.
    ///
    /// A missing credential is not fatal: the server still starts and every
    /// chat request is answered with a configuration error.
    pub fn init(config: &IkarusConfig) -> Self {
        let key_env = &config.upstream.api_key_env;
        let api_key = EnvSecretProvider::new().get(key_env);
        if api_key.is_none() {
            tracing::warn!(env = %key_env, "completion API key is not set; chat requests will fail");
        }

        let provider = create_provider(&config.upstream, api_key);
        Self::new(RelayService::new(provider, config.upstream.model.clone()))
    }
}
