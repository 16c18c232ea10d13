//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! The `gen_ai.complete` span opened around every completion call declares
//! the request attributes inline (`gen_ai.system`, `gen_ai.request.model`,
//! `gen_ai.request.temperature`, `gen_ai.request.max_tokens`). The response
//! attributes below are declared empty and filled in with `Span::record`
//! once the provider answers.

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// The finish reason reported by the provider (e.g., "stop", "length").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";
