//! Common imports for most tiddlywinks applications.

pub use crate::{anthropic_toolset, ollama_toolset, openai_toolset};
pub use crate::{tw_field, tw_params, tw_type};
pub use crate::{
    AnthropicToolResult, AnthropicToolUse, AnthropicToolset, ArgMap, BoxFuture, CallOutcome,
    CaptureTool, DispatchError, DispatchHooks, Field, Function, FunctionBuilder, HandlerError,
    HandlerResult, InvokeError, MetricsDispatchHooks, NoopDispatchHooks, OllamaToolCall,
    OllamaToolset, OpenAiToolCall, OpenAiToolset, OutputShape, RecordType, ResultSlot,
    SafeDispatchHooks, SchemaError, SchemaErrorKind, ToolEntry, ToolInvocation, ToolProvider,
    Toolbox, ToolboxError, ToolboxErrorKind, ToolsetError, TracingDispatchHooks,
    ValidationError, ValidationIssue, ValueType, CAPTURE_TOOL_NAME,
};
