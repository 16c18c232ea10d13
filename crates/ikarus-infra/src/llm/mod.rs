//! LLM provider implementations.
//!
//! [`create_provider`] builds the provider the Server Relay is started with,
//! or nothing when the credential is missing.

pub mod openai_compat;

use secrecy::SecretString;

use ikarus_core::llm::box_provider::BoxLlmProvider;
use ikarus_types::config::UpstreamConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Build the upstream provider from configuration and a resolved credential.
///
/// Returns `None` when no credential is available; the relay then answers
/// every request with a configuration error instead of calling out.
pub fn create_provider(
    config: &UpstreamConfig,
    api_key: Option<SecretString>,
) -> Option<BoxLlmProvider> {
    let api_key = api_key?;
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: "openai".to_string(),
        base_url: config.api_base.clone(),
        api_key,
        model: config.model.clone(),
    });
    Some(BoxLlmProvider::new(provider))
}
