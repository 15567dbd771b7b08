//! The Ghost: conversation owner and completion orchestrator.
//!
//! A `Ghost` owns one session's [`ConversationState`] and the provider it
//! talks to. `process` snapshots history, optionally prepends a system
//! message rendered from a [`PromptContext`], and hands the list to the
//! provider. It never writes the result back into history; that is the
//! caller's job (see `Shell`).

use serde_json::Value;
use tracing::{Instrument, info_span};

use ghostshell_types::llm::{CompletionResult, LlmError, Message, ToolDefinition};

use crate::conversation::ConversationState;
use crate::llm::box_provider::BoxLlmProvider;

use super::context::PromptContext;

/// Owns conversation state and the completion provider for a session.
#[derive(Debug)]
pub struct Ghost {
    provider: BoxLlmProvider,
    state: ConversationState,
    tools: Vec<ToolDefinition>,
}

impl Ghost {
    /// A ghost with empty history and scratch space.
    pub fn new(provider: BoxLlmProvider) -> Self {
        Self::with_state(provider, ConversationState::new())
    }

    /// A ghost that takes ownership of existing state.
    pub fn with_state(provider: BoxLlmProvider, state: ConversationState) -> Self {
        Self {
            provider,
            state,
            tools: Vec::new(),
        }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ConversationState {
        &mut self.state
    }

    /// Append a message to history.
    pub fn add_message(&mut self, message: Message) {
        self.state.append(message);
    }

    /// Snapshot of the conversation history.
    pub fn history(&self) -> Vec<Message> {
        self.state.snapshot()
    }

    pub fn clear_history(&mut self) {
        self.state.clear();
    }

    pub fn update_internal_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.set(key, value);
    }

    pub fn get_internal_state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Tool definitions offered to the provider on every call.
    pub fn set_tools(&mut self, tools: Vec<ToolDefinition>) {
        self.tools = tools;
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Run a completion over the current history.
    ///
    /// Provider errors are returned unchanged.
    pub async fn process(
        &self,
        context: Option<&PromptContext>,
    ) -> Result<CompletionResult, LlmError> {
        let messages = self.prepare_messages(context);
        let span = self.completion_span(&messages, false);
        self.provider
            .complete(&messages, self.offered_tools())
            .instrument(span)
            .await
    }

    /// Blocking form of [`Ghost::process`].
    pub fn process_blocking(
        &self,
        context: Option<&PromptContext>,
    ) -> Result<CompletionResult, LlmError> {
        let messages = self.prepare_messages(context);
        let span = self.completion_span(&messages, true);
        let _enter = span.enter();
        self.provider
            .complete_blocking(&messages, self.offered_tools())
    }

    /// History snapshot, prefixed with the rendered context when present.
    pub fn prepare_messages(&self, context: Option<&PromptContext>) -> Vec<Message> {
        let history = self.state.snapshot();
        match context.and_then(PromptContext::to_system_message) {
            Some(system) => {
                let mut messages = Vec::with_capacity(history.len() + 1);
                messages.push(system);
                messages.extend(history);
                messages
            }
            None => history,
        }
    }

    fn offered_tools(&self) -> Option<&[ToolDefinition]> {
        if self.tools.is_empty() {
            None
        } else {
            Some(&self.tools)
        }
    }

    fn completion_span(&self, messages: &[Message], blocking: bool) -> tracing::Span {
        info_span!(
            "gen_ai.complete",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.messages = messages.len(),
            gen_ai.request.tools = self.tools.len(),
            blocking,
        )
    }
}
