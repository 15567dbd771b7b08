//! Span field names from the OpenTelemetry GenAI semantic conventions.
//!
//! Use them as constant field names, e.g.
//! `info_span!("chat", { GEN_AI_REQUEST_MODEL } = model)`.

/// Operation performed, e.g. [`OP_CHAT`].
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// Endpoint family that served the call ("glm", "openai", ...).
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// Finish reason reported by the provider ("stop", "tool_calls", ...).
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Provider-assigned completion id.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Chat completion.
pub const OP_CHAT: &str = "chat";
