//! Per-source connection defaults for the OpenAI-compatible provider.

use secrecy::SecretString;

use ghostshell_types::llm::{ModelSource, ProviderCapabilities};

/// Everything needed to construct a [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Name reported by the provider ("glm", "openai", ...).
    pub provider_name: String,
    pub base_url: String,
    pub api_key: SecretString,
    pub model: String,
    /// Sent as `max_completion_tokens` when set.
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub capabilities: ProviderCapabilities,
}

impl OpenAiCompatConfig {
    fn with_defaults(
        provider_name: &str,
        base_url: &str,
        api_key: SecretString,
        model: &str,
        capabilities: ProviderCapabilities,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            max_tokens: None,
            temperature: None,
            capabilities,
        }
    }
}

/// Defaults for `source`.
pub fn defaults_for(source: ModelSource, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    match source {
        ModelSource::Glm => glm_defaults(api_key, model),
        ModelSource::OpenAi => openai_defaults(api_key, model),
        ModelSource::Gemini => gemini_defaults(api_key, model),
        ModelSource::Mistral => mistral_defaults(api_key, model),
    }
}

/// GLM (z.ai) coding endpoint.
///
/// Base URL: `https://api.z.ai/api/coding/paas/v4`. No vision; 200K context, 128K output.
pub fn glm_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults(
        "glm",
        "https://api.z.ai/api/coding/paas/v4",
        api_key,
        model,
        ProviderCapabilities {
            tool_calling: true,
            vision: false,
            max_context_tokens: 200_000,
            max_output_tokens: 128_000,
        },
    )
}

/// OpenAI. Base URL: `https://api.openai.com/v1`; 128K context, 16K output.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults(
        "openai",
        "https://api.openai.com/v1",
        api_key,
        model,
        ProviderCapabilities {
            tool_calling: true,
            vision: true,
            max_context_tokens: 128_000,
            max_output_tokens: 16_384,
        },
    )
}

/// Google Gemini through its OpenAI-compatible beta endpoint; 1M context, 64K output.
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults(
        "gemini",
        "https://generativelanguage.googleapis.com/v1beta/openai",
        api_key,
        model,
        ProviderCapabilities {
            tool_calling: true,
            vision: true,
            max_context_tokens: 1_000_000,
            max_output_tokens: 65_536,
        },
    )
}

/// Mistral AI. Base URL: `https://api.mistral.ai/v1`; 128K context, 32K output.
pub fn mistral_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults(
        "mistral",
        "https://api.mistral.ai/v1",
        api_key,
        model,
        ProviderCapabilities {
            tool_calling: true,
            vision: true,
            max_context_tokens: 128_000,
            max_output_tokens: 32_768,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn key() -> SecretString {
        SecretString::from("test-key")
    }

    #[test]
    fn test_glm_defaults() {
        let config = glm_defaults(key(), "glm-4.7-flash");
        assert_eq!(config.provider_name, "glm");
        assert_eq!(config.base_url, "https://api.z.ai/api/coding/paas/v4");
        assert_eq!(config.api_key.expose_secret(), "test-key");
        assert_eq!(config.model, "glm-4.7-flash");
        assert!(!config.capabilities.vision);
        assert!(config.max_tokens.is_none());
        assert!(config.temperature.is_none());
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(key(), "gpt-4o");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.capabilities.max_output_tokens, 16_384);
    }

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(key(), "gemini-2.5-flash");
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
        assert_eq!(config.capabilities.max_context_tokens, 1_000_000);
    }

    #[test]
    fn test_defaults_for_every_source() {
        for source in [
            ModelSource::Glm,
            ModelSource::OpenAi,
            ModelSource::Gemini,
            ModelSource::Mistral,
        ] {
            let config = defaults_for(source, key(), "m");
            assert_eq!(config.provider_name, source.to_string());
            assert!(config.base_url.starts_with("https://"));
            assert!(config.capabilities.tool_calling);
        }
    }
}
