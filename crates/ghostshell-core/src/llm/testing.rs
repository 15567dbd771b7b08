//! Stub providers shared by the core unit tests.

use std::sync::{Arc, Mutex};

use ghostshell_types::llm::{
    CompletionResult, LlmError, Message, ProviderCapabilities, ToolDefinition,
};

use super::provider::LlmProvider;

/// Every message list a stub has been called with, oldest first.
pub(crate) type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub messages: Vec<Message>,
    pub tools: Option<Vec<ToolDefinition>>,
}

#[derive(Clone)]
enum Reply {
    Result(CompletionResult),
    AuthFailure,
}

/// Provider that returns a canned reply and records what it was sent.
pub(crate) struct StubProvider {
    reply: Reply,
    capabilities: ProviderCapabilities,
    calls: CallLog,
}

impl StubProvider {
    pub fn returning(result: CompletionResult) -> Self {
        Self {
            reply: Reply::Result(result),
            capabilities: ProviderCapabilities {
                tool_calling: true,
                vision: false,
                max_context_tokens: 8_192,
                max_output_tokens: 1_024,
            },
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::returning(CompletionResult::text(content))
    }

    /// A stub whose every call fails with `LlmError::AuthenticationFailed`.
    pub fn failing() -> Self {
        Self {
            reply: Reply::AuthFailure,
            ..Self::replying("")
        }
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn answer(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            tools: tools.map(<[ToolDefinition]>::to_vec),
        });
        match &self.reply {
            Reply::Result(result) => Ok(result.clone()),
            Reply::AuthFailure => Err(LlmError::AuthenticationFailed),
        }
    }
}

impl LlmProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError> {
        self.answer(messages, tools)
    }

    fn complete_blocking(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError> {
        self.answer(messages, tools)
    }
}
