//! Adapter for the Anthropic tool-use wire protocol.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tcommon::BoxFuture;
use ttools::{
    CallOutcome, DispatchHooks, NoopDispatchHooks, ResultSlot, ToolInvocation, Toolbox,
};

use crate::{AdapterError, TOOL_ERROR_CONTENT, ToolProvider, render_content};

const TOOL_NAME_MAX_LEN: usize = 64;

/// Anthropic tool names must match `[A-Za-z0-9_-]{1,64}`.
fn is_valid_tool_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= TOOL_NAME_MAX_LEN
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// One entry of the protocol's tool list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnthropicToolParam {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// The assistant's "call tool X with input Y" block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropicToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// The result block sent back for one tool use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnthropicToolResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub tool_use_id: String,
    pub content: String,
    pub is_error: bool,
}

/// Toolbox bound to the Anthropic protocol.
pub struct AnthropicToolset {
    toolbox: Arc<Toolbox>,
    hooks: Arc<dyn DispatchHooks>,
}

impl std::fmt::Debug for AnthropicToolset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicToolset")
            .field("toolbox", &self.toolbox)
            .finish_non_exhaustive()
    }
}

impl AnthropicToolset {
    /// Binds a toolbox, validating every tool name against the
    /// protocol's stricter name pattern.
    pub fn new(toolbox: Toolbox) -> Result<Self, AdapterError> {
        for entry in toolbox.entries() {
            if !is_valid_tool_name(entry.name()) {
                return Err(AdapterError::invalid_tool_name(
                    entry.name(),
                    "must match [A-Za-z0-9_-]{1,64}",
                ));
            }
        }

        Ok(Self {
            toolbox: Arc::new(toolbox),
            hooks: Arc::new(NoopDispatchHooks),
        })
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    /// The shared result slot, when the toolbox captures a result.
    pub fn slot(&self) -> Option<Arc<ResultSlot>> {
        self.toolbox.slot()
    }

    /// The protocol's tool-list wire shape, capture tool included.
    pub fn tool_params(&self) -> Vec<AnthropicToolParam> {
        self.toolbox
            .entries()
            .map(|entry| AnthropicToolParam {
                name: entry.name().to_string(),
                description: entry.description().unwrap_or_default().to_string(),
                input_schema: entry.input_schema(),
            })
            .collect()
    }

    /// Dispatches one tool use and renders its result block.
    ///
    /// Failures render the fixed error content with `is_error` set; the
    /// underlying failure settles the shared slot.
    pub async fn handle(&self, tool_use: &AnthropicToolUse) -> AnthropicToolResult {
        let call = ToolInvocation::new(&tool_use.id, &tool_use.name, tool_use.input.clone());
        let outcome = self
            .toolbox
            .dispatch_with_hooks(&call, self.hooks.as_ref())
            .await;

        let (content, is_error) = match outcome {
            CallOutcome::Completed(value) => (render_content(&value), false),
            CallOutcome::Captured => (render_content(&Value::Null), false),
            CallOutcome::Failed(_) => (TOOL_ERROR_CONTENT.to_string(), true),
        };

        AnthropicToolResult {
            kind: "tool_result".to_string(),
            tool_use_id: tool_use.id.clone(),
            content,
            is_error,
        }
    }
}

impl ToolProvider for AnthropicToolset {
    type ToolParam = AnthropicToolParam;
    type Call = AnthropicToolUse;
    type Output = AnthropicToolResult;

    fn render_list(&self) -> Vec<AnthropicToolParam> {
        self.tool_params()
    }

    fn dispatch<'a>(&'a self, calls: &'a [AnthropicToolUse]) -> BoxFuture<'a, Vec<AnthropicToolResult>> {
        Box::pin(async move {
            let mut results = Vec::with_capacity(calls.len());
            for tool_use in calls {
                results.push(self.handle(tool_use).await);
            }
            results
        })
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_tool_name;

    #[test]
    fn tool_name_pattern_accepts_word_characters_and_dashes() {
        assert!(is_valid_tool_name("calculate"));
        assert!(is_valid_tool_name("__return__"));
        assert!(is_valid_tool_name("look-up_2"));
    }

    #[test]
    fn tool_name_pattern_rejects_spaces_symbols_and_overlong_names() {
        assert!(!is_valid_tool_name(""));
        assert!(!is_valid_tool_name("has space"));
        assert!(!is_valid_tool_name("émoji"));
        assert!(!is_valid_tool_name(&"x".repeat(65)));
    }
}
