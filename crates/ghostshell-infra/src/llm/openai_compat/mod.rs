//! OpenAI-compatible completion provider.
//!
//! One [`OpenAiCompatibleProvider`] serves GLM, OpenAI, Gemini and Mistral
//! through configurable base URLs. Request and response types come from
//! [`async_openai`].

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionMessageToolCalls, ChatCompletionRequestAssistantMessage,
    ChatCompletionRequestAssistantMessageContent, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessage, ChatCompletionRequestSystemMessageContent,
    ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent, ChatCompletionTool,
    ChatCompletionTools, CreateChatCompletionRequest, CreateChatCompletionResponse,
    FinishReason as OaiFinishReason, FunctionObject,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, field::Empty, info_span};

use ghostshell_core::llm::provider::LlmProvider;
use ghostshell_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MAX_TOKENS, GEN_AI_REQUEST_MODEL,
    GEN_AI_REQUEST_TEMPERATURE, GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID,
    GEN_AI_USAGE_INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use ghostshell_types::llm::{
    CompletionResult, FinishReason, LlmError, Message, MessageRole, ProviderCapabilities,
    ToolCall, ToolDefinition,
};

use self::config::OpenAiCompatConfig;

/// Provider for any endpoint speaking the OpenAI chat completions protocol.
///
/// Does not implement `Debug`: the inner client holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
    capabilities: ProviderCapabilities,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            base_url: config.base_url,
            model: config.model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            capabilities: config.capabilities,
        }
    }

    pub fn glm(api_key: SecretString, model: &str) -> Self {
        Self::new(config::glm_defaults(api_key, model))
    }

    pub fn openai(api_key: SecretString, model: &str) -> Self {
        Self::new(config::openai_defaults(api_key, model))
    }

    pub fn gemini(api_key: SecretString, model: &str) -> Self {
        Self::new(config::gemini_defaults(api_key, model))
    }

    pub fn mistral(api_key: SecretString, model: &str) -> Self {
        Self::new(config::mistral_defaults(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> CreateChatCompletionRequest {
        let messages = messages.iter().map(to_request_message).collect();

        let tools = tools
            .filter(|tools| !tools.is_empty())
            .map(|tools| tools.iter().map(to_function_tool).collect());

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            tools,
            max_completion_tokens: self.max_tokens,
            temperature: self.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError> {
        let request = self.build_request(messages, tools);

        let span = info_span!(
            "chat",
            { GEN_AI_OPERATION_NAME } = OP_CHAT,
            { GEN_AI_PROVIDER_NAME } = self.provider_name.as_str(),
            { GEN_AI_REQUEST_MODEL } = self.model.as_str(),
            { GEN_AI_REQUEST_MAX_TOKENS } = self.max_tokens,
            { GEN_AI_REQUEST_TEMPERATURE } = self.temperature,
            { GEN_AI_RESPONSE_ID } = Empty,
            { GEN_AI_RESPONSE_FINISH_REASONS } = Empty,
            { GEN_AI_USAGE_INPUT_TOKENS } = Empty,
            { GEN_AI_USAGE_OUTPUT_TOKENS } = Empty,
        );

        let response = self
            .client
            .chat()
            .create(request)
            .instrument(span.clone())
            .await
            .map_err(map_openai_error)?;

        span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
        if let Some(usage) = &response.usage {
            span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.prompt_tokens);
            span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.completion_tokens);
        }

        let result = into_completion_result(response);
        span.record(
            GEN_AI_RESPONSE_FINISH_REASONS,
            result.finish_reason.to_string().as_str(),
        );
        Ok(result)
    }

    /// Drives [`LlmProvider::complete`] on a private current-thread runtime.
    ///
    /// Returns [`LlmError::Runtime`] instead of blocking when the calling
    /// thread is already inside a tokio runtime.
    fn complete_blocking(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<CompletionResult, LlmError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(LlmError::Runtime(
                "blocking completion called from within an async runtime".to_string(),
            ));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Runtime(format!("failed to start runtime: {e}")))?;

        runtime.block_on(self.complete(messages, tools))
    }
}

fn to_request_message(message: &Message) -> ChatCompletionRequestMessage {
    match message.role {
        MessageRole::System => {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(message.content.clone()),
                name: None,
            })
        }
        MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(message.content.clone()),
            name: None,
        }),
        MessageRole::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    message.content.clone(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

fn to_function_tool(tool: &ToolDefinition) -> ChatCompletionTools {
    ChatCompletionTools::Function(ChatCompletionTool {
        function: FunctionObject {
            name: tool.name.clone(),
            description: Some(tool.description.clone()),
            parameters: Some(tool.parameters.clone()),
            strict: None,
        },
    })
}

/// First choice of `response` as a [`CompletionResult`].
///
/// Missing content becomes `""`; a missing finish reason is read as `Stop`.
fn into_completion_result(response: CreateChatCompletionResponse) -> CompletionResult {
    let Some(choice) = response.choices.into_iter().next() else {
        tracing::warn!("completion response contained no choices");
        return CompletionResult::text("");
    };

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .filter_map(|call| match call {
            ChatCompletionMessageToolCalls::Function(call) => Some(ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            }),
            other => {
                tracing::debug!(?other, "skipping non-function tool call");
                None
            }
        })
        .collect();

    let finish_reason = match choice.finish_reason {
        Some(OaiFinishReason::Stop) | None => FinishReason::Stop,
        Some(OaiFinishReason::Length) => FinishReason::Length,
        Some(OaiFinishReason::ToolCalls) => FinishReason::ToolCalls,
        Some(OaiFinishReason::ContentFilter) => FinishReason::ContentFilter,
        Some(OaiFinishReason::FunctionCall) => FinishReason::FunctionCall,
    };

    CompletionResult {
        content: choice.message.content.unwrap_or_default(),
        tool_calls,
        finish_reason,
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "context_length_exceeded"
                || api_err.message.contains("maximum context length")
            {
                LlmError::ContextLengthExceeded {
                    max: 0,
                    requested: 0,
                }
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            Some(503 | 529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
