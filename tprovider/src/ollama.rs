//! Adapter for the Ollama tool-calling wire protocol.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tcommon::BoxFuture;
use ttools::{
    CallOutcome, DispatchHooks, NoopDispatchHooks, ResultSlot, ToolEntry, ToolInvocation,
    Toolbox,
};

use crate::{TOOL_ERROR_CONTENT, ToolProvider};

/// One entry of the protocol's tool list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: OllamaFunctionDef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// One tool call from the model. The protocol carries no call id and the
/// arguments are protocol-native JSON, defaulting to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaToolCall {
    pub function: OllamaFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Toolbox bound to the Ollama protocol.
///
/// For compatibility with the protocol's calling convention this adapter
/// also behaves as a sequence over its own tool list.
pub struct OllamaToolset {
    toolbox: Arc<Toolbox>,
    hooks: Arc<dyn DispatchHooks>,
}

impl OllamaToolset {
    pub fn new(toolbox: Toolbox) -> Self {
        Self {
            toolbox: Arc::new(toolbox),
            hooks: Arc::new(NoopDispatchHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn toolbox(&self) -> &Toolbox {
        &self.toolbox
    }

    pub fn slot(&self) -> Option<Arc<ResultSlot>> {
        self.toolbox.slot()
    }

    /// The protocol's tool-list wire shape, schemas passed through
    /// unmodified.
    pub fn tools(&self) -> Vec<OllamaTool> {
        self.toolbox
            .entries()
            .map(|entry| OllamaTool {
                kind: "function".to_string(),
                function: OllamaFunctionDef {
                    name: entry.name().to_string(),
                    description: entry.description().unwrap_or_default().to_string(),
                    parameters: entry.input_schema(),
                },
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.toolbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolbox.is_empty()
    }

    /// Positional access into the rendered tool list.
    pub fn get(&self, index: usize) -> Option<OllamaTool> {
        self.tools().into_iter().nth(index)
    }

    /// Name-keyed access into the underlying toolbox.
    pub fn entry(&self, name: &str) -> Option<&ToolEntry> {
        self.toolbox.lookup(name)
    }

    /// Dispatches a batch of tool calls, continuing past failures, and
    /// returns one protocol-native value per call in order. Failed calls
    /// yield the fixed error content; the real failure settles the slot.
    pub async fn handle(&self, tool_calls: &[OllamaToolCall]) -> Vec<Value> {
        let mut outputs = Vec::with_capacity(tool_calls.len());
        for (index, tool_call) in tool_calls.iter().enumerate() {
            let call = ToolInvocation::new(
                format!("call_{index}"),
                &tool_call.function.name,
                tool_call.function.arguments.clone(),
            );
            let outcome = self
                .toolbox
                .dispatch_with_hooks(&call, self.hooks.as_ref())
                .await;

            outputs.push(match outcome {
                CallOutcome::Completed(value) => value,
                CallOutcome::Captured => Value::Null,
                CallOutcome::Failed(_) => Value::String(TOOL_ERROR_CONTENT.to_string()),
            });
        }
        outputs
    }
}

impl<'a> IntoIterator for &'a OllamaToolset {
    type Item = OllamaTool;
    type IntoIter = std::vec::IntoIter<OllamaTool>;

    fn into_iter(self) -> Self::IntoIter {
        self.tools().into_iter()
    }
}

impl ToolProvider for OllamaToolset {
    type ToolParam = OllamaTool;
    type Call = OllamaToolCall;
    type Output = Value;

    fn render_list(&self) -> Vec<OllamaTool> {
        self.tools()
    }

    fn dispatch<'a>(&'a self, calls: &'a [OllamaToolCall]) -> BoxFuture<'a, Vec<Value>> {
        Box::pin(self.handle(calls))
    }
}
