use thiserror::Error;

use crate::llm::LlmError;

/// A transformer in a chain refused or failed to transform its input.
///
/// Carries the registered name of the failing transformer so callers can
/// tell which stage of a chain stopped the fold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transformer '{transformer}' failed: {message}")]
pub struct TransformError {
    pub transformer: String,
    pub message: String,
}

impl TransformError {
    pub fn new(transformer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            transformer: transformer.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by `Shell` when processing a turn.
///
/// Both variants wrap the underlying error untouched.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Completion(#[from] LlmError),
}

/// Errors from assembling a session at startup (bad source, missing key).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown model source: '{0}'")]
    UnknownSource(String),

    #[error("API key required. Provide via --api-key or {env_var} environment variable")]
    MissingApiKey { env_var: String },

    #[error("unknown enhancer: '{0}'")]
    UnknownEnhancer(String),
}
