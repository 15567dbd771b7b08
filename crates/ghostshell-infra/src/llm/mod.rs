//! Completion provider implementations.
//!
//! Every supported source speaks the OpenAI chat completions protocol, so
//! [`create_provider`] always builds an [`OpenAiCompatibleProvider`] and
//! only varies its defaults.

pub mod openai_compat;

use secrecy::SecretString;

use ghostshell_core::llm::box_provider::BoxLlmProvider;
use ghostshell_types::llm::ProviderConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::defaults_for;

/// Build a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// `base_url`, `max_tokens` and `temperature` from the config override the
/// source defaults when set.
pub fn create_provider(config: &ProviderConfig, api_key: SecretString) -> BoxLlmProvider {
    let mut oai_config = defaults_for(config.source, api_key, &config.model);
    if let Some(base_url) = &config.base_url {
        oai_config.base_url = base_url.clone();
    }
    oai_config.max_tokens = config.max_tokens;
    oai_config.temperature = config.temperature;

    tracing::debug!(
        source = %config.source,
        model = %config.model,
        base_url = %oai_config.base_url,
        "creating completion provider"
    );

    BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config))
}
