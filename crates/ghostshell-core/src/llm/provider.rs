//! LlmProvider trait definition.
//!
//! This is the completion capability every provider implements. Uses RPITIT
//! for the async `complete`; `complete_blocking` is the same call for callers
//! that are not running inside an async runtime.

use ghostshell_types::llm::{
    CompletionResult, LlmError, Message, ProviderCapabilities, ToolDefinition,
};

/// Trait for LLM provider backends (GLM, OpenAI, etc.).
///
/// Both completion methods take the full ordered message list and must
/// return the same result for the same input. Retries, timeouts and rate
/// limiting are the implementation's business; callers propagate whatever
/// error comes back.
///
/// Implementations live in ghostshell-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "glm", "openai").
    fn name(&self) -> &str;

    /// What this provider supports.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send the messages and wait for the full completion.
    fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> impl std::future::Future<Output = Result<CompletionResult, LlmError>> + Send;

    /// Blocking form of [`LlmProvider::complete`].
    ///
    /// Must not be called from within an async runtime.
    fn complete_blocking(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError>;
}
