//! Global configuration types for Ghostshell.
//!
//! `GlobalConfig` represents the optional `config.toml` in the data
//! directory. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Default model source when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "glm";

/// Default model identifier when nothing else is configured.
pub const DEFAULT_MODEL: &str = "glm-4.7-flash";

/// Top-level configuration loaded from `~/.ghostshell/config.toml`.
///
/// `source` stays a plain string here; it is parsed into a `ModelSource`
/// when the session is built so an unknown value surfaces as a
/// configuration error instead of silently resetting the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f64>,

    /// Names of built-in context enhancers applied to every inbound message.
    #[serde(default)]
    pub enhancers: Vec<String>,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            model: default_model(),
            base_url: None,
            max_tokens: None,
            temperature: None,
            enhancers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.source, "glm");
        assert_eq!(config.model, "glm-4.7-flash");
        assert!(config.base_url.is_none());
        assert!(config.enhancers.is_empty());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
source = "mistral"
model = "mistral-large-latest"
temperature = 0.2
enhancers = ["rag", "web_search"]
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source, "mistral");
        assert_eq!(config.model, "mistral-large-latest");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.enhancers, vec!["rag", "web_search"]);
        assert!(config.max_tokens.is_none());
    }
}
