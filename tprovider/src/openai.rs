//! Adapter for the OpenAI function-calling wire protocol.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tcommon::BoxFuture;
use ttools::{
    CallOutcome, DispatchError, DispatchHooks, NoopDispatchHooks, ResultSlot, ToolInvocation,
    Toolbox,
};

use crate::{TOOL_ERROR_CONTENT, ToolProvider, render_content};

/// One entry of the protocol's tool list, declared in strict mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiToolParam {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: OpenAiFunctionDef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiFunctionDef {
    pub name: String,
    pub description: String,
    pub strict: bool,
    pub parameters: Value,
}

/// One tool call from the assistant; arguments arrive JSON-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    pub id: String,
    pub function: OpenAiFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// The output submitted back for one tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

/// Toolbox bound to the OpenAI protocol.
pub struct OpenAiToolset {
    toolbox: Arc<Toolbox>,
    hooks: Arc<dyn DispatchHooks>,
}

impl std::fmt::Debug for OpenAiToolset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiToolset")
            .field("toolbox", &self.toolbox)
            .finish_non_exhaustive()
    }
}

impl OpenAiToolset {
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

    /// The protocol's tool-list wire shape. Strict mode sanitizes each
    /// schema: internal `x-order` markers are stripped and additional
    /// properties are forced off, at every nesting level.
    pub fn tool_params(&self) -> Vec<OpenAiToolParam> {
        self.toolbox
            .entries()
            .map(|entry| {
                let mut parameters = entry.input_schema();
                sanitize_for_strict(&mut parameters);

                OpenAiToolParam {
                    kind: "function".to_string(),
                    function: OpenAiFunctionDef {
                        name: entry.name().to_string(),
                        description: entry.description().unwrap_or_default().to_string(),
                        strict: true,
                        parameters,
                    },
                }
            })
            .collect()
    }

    /// Dispatches a batch of tool calls, continuing past failures, and
    /// renders one output per call in order.
    pub async fn handle(&self, tool_calls: &[OpenAiToolCall]) -> Vec<OpenAiToolOutput> {
        let mut outputs = Vec::with_capacity(tool_calls.len());
        for tool_call in tool_calls {
            let output = match serde_json::from_str::<Value>(&tool_call.function.arguments) {
                Ok(arguments) => {
                    let call =
                        ToolInvocation::new(&tool_call.id, &tool_call.function.name, arguments);
                    match self
                        .toolbox
                        .dispatch_with_hooks(&call, self.hooks.as_ref())
                        .await
                    {
                        CallOutcome::Completed(value) => render_content(&value),
                        CallOutcome::Captured => render_content(&Value::Null),
                        CallOutcome::Failed(_) => TOOL_ERROR_CONTENT.to_string(),
                    }
                }
                Err(error) => {
                    // Undecodable argument payloads are dispatch-level
                    // failures: settle the slot and report in-channel.
                    if let Some(slot) = self.toolbox.slot() {
                        slot.reject(DispatchError::invalid_arguments(
                            &tool_call.function.name,
                            format!("arguments are not valid JSON: {error}"),
                        ));
                    }
                    TOOL_ERROR_CONTENT.to_string()
                }
            };

            outputs.push(OpenAiToolOutput {
                tool_call_id: tool_call.id.clone(),
                output,
            });
        }
        outputs
    }
}

impl ToolProvider for OpenAiToolset {
    type ToolParam = OpenAiToolParam;
    type Call = OpenAiToolCall;
    type Output = OpenAiToolOutput;

    fn render_list(&self) -> Vec<OpenAiToolParam> {
        self.tool_params()
    }

    fn dispatch<'a>(&'a self, calls: &'a [OpenAiToolCall]) -> BoxFuture<'a, Vec<OpenAiToolOutput>> {
        Box::pin(self.handle(calls))
    }
}

fn sanitize_for_strict(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            map.remove("x-order");
            if map.contains_key("properties") {
                map.insert("additionalProperties".to_string(), json!(false));
            }
            for nested in map.values_mut() {
                sanitize_for_strict(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                sanitize_for_strict(item);
            }
        }
        _ => {}
    }
}
