//! Global configuration loader for Ghostshell.
//!
//! Reads `config.toml` from the data directory (`~/.ghostshell/` unless
//! `GHOSTSHELL_HOME` says otherwise). A missing or malformed file is not
//! fatal; the loader falls back to defaults.

use std::path::{Path, PathBuf};

use ghostshell_types::config::GlobalConfig;
use ghostshell_types::error::ConfigError;
use ghostshell_types::llm::{ModelSource, ProviderConfig};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "GHOSTSHELL_HOME";

/// Resolve the data directory: `$GHOSTSHELL_HOME`, else `~/.ghostshell`.
///
/// Falls back to `./.ghostshell` when no home directory can be determined.
pub fn data_dir() -> PathBuf {
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ghostshell"),
    }
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`GlobalConfig::default()`].
/// - Unreadable or unparsable file: a warning, then the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Turn the merged configuration into a [`ProviderConfig`].
///
/// # Errors
///
/// [`ConfigError::UnknownSource`] when `source` names no known endpoint family.
pub fn provider_config(config: &GlobalConfig) -> Result<ProviderConfig, ConfigError> {
    let source: ModelSource = config
        .source
        .parse()
        .map_err(|_| ConfigError::UnknownSource(config.source.clone()))?;

    Ok(ProviderConfig {
        source,
        model: config.model.clone(),
        base_url: config.base_url.clone(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
source = "openai"
model = "gpt-4o-mini"
max_tokens = 512
enhancers = ["persistent_memory"]
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.source, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.enhancers, vec!["persistent_memory"]);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "source = [not toml")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn provider_config_parses_source() {
        let config = GlobalConfig {
            source: "Mistral".to_string(),
            model: "mistral-small-latest".to_string(),
            temperature: Some(0.3),
            ..GlobalConfig::default()
        };
        let provider = provider_config(&config).unwrap();
        assert_eq!(provider.source, ModelSource::Mistral);
        assert_eq!(provider.model, "mistral-small-latest");
        assert_eq!(provider.temperature, Some(0.3));
        assert!(provider.base_url.is_none());
    }

    #[test]
    fn provider_config_rejects_unknown_source() {
        let config = GlobalConfig {
            source: "llama-farm".to_string(),
            ..GlobalConfig::default()
        };
        let err = provider_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSource(ref s) if s == "llama-farm"));
        assert_eq!(err.to_string(), "unknown model source: 'llama-farm'");
    }
}
