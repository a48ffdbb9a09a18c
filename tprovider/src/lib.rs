//! Adapters between the toolbox dispatch core and three external
//! tool-calling wire protocols.
//!
//! Each adapter renders the toolbox as its protocol's tool-list shape and
//! translates that protocol's tool calls into dispatches. Per-call
//! failures become protocol-shaped error payloads — they never escape the
//! dispatch entry point — and additionally settle the toolbox's shared
//! result slot when one is present.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;
use tcommon::BoxFuture;

mod anthropic;
mod ollama;
mod openai;

pub mod prelude {
    pub use crate::{
        AdapterError, AdapterErrorKind, AnthropicToolParam, AnthropicToolResult,
        AnthropicToolUse, AnthropicToolset, OllamaFunctionCall, OllamaTool, OllamaToolCall,
        OllamaToolset, OpenAiToolCall, OpenAiToolOutput, OpenAiToolParam, OpenAiToolset,
        ToolProvider,
    };
}

pub use anthropic::{
    AnthropicToolParam, AnthropicToolResult, AnthropicToolUse, AnthropicToolset,
};
pub use ollama::{OllamaFunctionCall, OllamaFunctionDef, OllamaTool, OllamaToolCall, OllamaToolset};
pub use openai::{
    OpenAiFunctionCall, OpenAiFunctionDef, OpenAiToolCall, OpenAiToolOutput, OpenAiToolParam,
    OpenAiToolset,
};

/// Fixed content returned to the assistant for a failed call. The real
/// failure travels through the shared result slot.
pub const TOOL_ERROR_CONTENT: &str = "An error occurred while calling the tool";

/// One protocol adapter: a tool-list renderer plus a batch dispatcher,
/// differing across implementations only in wire shapes.
pub trait ToolProvider {
    type ToolParam: Serialize;
    type Call;
    type Output;

    fn render_list(&self) -> Vec<Self::ToolParam>;

    fn dispatch<'a>(&'a self, calls: &'a [Self::Call]) -> BoxFuture<'a, Vec<Self::Output>>;
}

/// Renders a dispatched value for a textual result channel: strings pass
/// through raw, everything else as compact JSON.
pub(crate) fn render_content(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    InvalidToolName,
}

/// Construction-time failure while binding a toolbox to a protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub message: String,
}

impl AdapterError {
    pub fn invalid_tool_name(name: impl Into<String>, requirement: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: AdapterErrorKind::InvalidToolName,
            message: format!("invalid tool name '{}': {}", name, requirement.into()),
        }
    }
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for AdapterError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_content;

    #[test]
    fn strings_render_raw_and_other_values_render_as_json() {
        assert_eq!(render_content(&json!("plain")), "plain");
        assert_eq!(render_content(&json!(3)), "3");
        assert_eq!(render_content(&json!({"a": 1})), "{\"a\":1}");
        assert_eq!(render_content(&json!(null)), "null");
    }
}
