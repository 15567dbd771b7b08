//! Session assembly: config, provider, enhancers and ports.

use ghostshell_core::agent::{DEFAULT_CHANNEL, Ghost, Shell};
use ghostshell_core::llm::box_provider::BoxLlmProvider;
use ghostshell_core::pipeline::{EnhancerRegistry, OutputPort};
use ghostshell_infra::config::provider_config;
use ghostshell_infra::llm::create_provider;
use ghostshell_infra::secret::resolve_api_key;
use ghostshell_types::config::GlobalConfig;
use ghostshell_types::error::ConfigError;
use ghostshell_types::llm::{CompletionResult, ModelSource};

use crate::cli::Cli;

/// A ready-to-use chat session.
pub struct ChatSetup {
    pub shell: Shell,
    pub source: ModelSource,
    pub model: String,
}

/// Build the session from the file config layered under the CLI flags.
///
/// # Errors
///
/// Unknown source, missing API key, or an enhancer name the registry
/// does not know.
pub fn build_session(cli: &Cli, file_config: GlobalConfig) -> Result<ChatSetup, ConfigError> {
    let config = cli.apply_overrides(file_config);
    let provider_config = provider_config(&config)?;
    let api_key = resolve_api_key(cli.api_key.as_deref())?;
    let provider = create_provider(&provider_config, api_key);

    let shell = build_shell(provider, &config.enhancers, &EnhancerRegistry::with_builtins())?;

    tracing::info!(
        source = %provider_config.source,
        model = %provider_config.model,
        enhancers = ?config.enhancers,
        "chat session ready"
    );

    Ok(ChatSetup {
        shell,
        source: provider_config.source,
        model: provider_config.model,
    })
}

/// Wrap `provider` in a [`Shell`] with the named enhancers and the default output port.
pub fn build_shell(
    provider: BoxLlmProvider,
    enhancers: &[String],
    registry: &EnhancerRegistry,
) -> Result<Shell, ConfigError> {
    let mut shell = Shell::new(Ghost::new(provider));

    for name in enhancers {
        let enhancer = registry
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEnhancer(name.clone()))?;
        shell.add_context_enhancer(enhancer);
    }

    shell.add_output_port(OutputPort::new(DEFAULT_CHANNEL).with_fn(
        "trim",
        |mut result: CompletionResult| {
            result.content = result.content.trim().to_string();
            result
        },
    ));

    Ok(shell)
}
