//! Unified facade over the tiddlywinks workspace crates.
//!
//! This crate is designed to be the single dependency for most
//! applications. It re-exports the core crates and provides convenience
//! constructors and macros for declaring tools.
//!
//! ```rust
//! use serde_json::json;
//! use tiddlywinks::prelude::*;
//!
//! let add = Function::builder("add")
//!     .doc(
//!         "Returns the sum of two numbers.
//!
//!         :param x: The first number
//!         :param y: The second number",
//!     )
//!     .params(tw_params![x: integer, y: integer])
//!     .returns(ValueType::Integer)
//!     .sync_handler(|args| {
//!         let x = args["x"].as_i64().unwrap_or_default();
//!         let y = args["y"].as_i64().unwrap_or_default();
//!         Ok(json!(x + y))
//!     })
//!     .build()
//!     .expect("descriptor should build");
//!
//! let tools = anthropic_toolset([add], Some(ValueType::Boolean))
//!     .expect("toolset should build");
//!
//! let params = tools.tool_params();
//! assert_eq!(params.len(), 2);
//! assert_eq!(params[0].name, "add");
//! assert_eq!(params[1].name, CAPTURE_TOOL_NAME);
//! ```

mod macros;

pub mod prelude;
pub mod util;

pub use serde_json;
pub use tcommon;
pub use tfunction;
pub use tobserve;
pub use tprovider;
pub use tschema;
pub use ttools;

pub use tcommon::{BoxFuture, OrderedRegistry};
pub use tfunction::{
    ArgMap, Function, FunctionBuilder, HandlerError, HandlerResult, InvokeError,
};
pub use tobserve::{MetricsDispatchHooks, SafeDispatchHooks, TracingDispatchHooks};
pub use tprovider::{
    AdapterError, AdapterErrorKind, AnthropicToolParam, AnthropicToolResult, AnthropicToolUse,
    AnthropicToolset, OllamaFunctionCall, OllamaFunctionDef, OllamaTool, OllamaToolCall,
    OllamaToolset, OpenAiFunctionCall, OpenAiFunctionDef, OpenAiToolCall, OpenAiToolOutput,
    OpenAiToolParam, OpenAiToolset, TOOL_ERROR_CONTENT, ToolProvider,
};
pub use tschema::{
    DocParam, Field, OutputShape, ParsedDoc, RecordType, RecordTypeBuilder, SchemaError,
    SchemaErrorKind, ValidationError, ValidationIssue, ValueType, parse_doc,
};
pub use ttools::{
    CAPTURE_TOOL_DESCRIPTION, CAPTURE_TOOL_NAME, CallOutcome, CaptureTool, DispatchError,
    DispatchHooks, NoopDispatchHooks, Resolved, ResultSlot, SlotResult, ToolEntry,
    ToolInvocation, Toolbox, ToolboxError, ToolboxErrorKind,
};
pub use util::{ToolsetError, anthropic_toolset, ollama_toolset, openai_toolset};

#[cfg(test)]
mod tests {
    use crate::ValueType;

    #[test]
    fn tw_field_macro_builds_required_and_defaulted_fields() {
        let x = crate::tw_field!(x: integer, "The first number");
        assert_eq!(x.name(), "x");
        assert_eq!(x.value_type(), &ValueType::Integer);
        assert_eq!(x.description_text(), Some("The first number"));
        assert!(x.is_required());

        let y = crate::tw_field!(y: integer = 2, "The second number");
        assert!(!y.is_required());
        assert_eq!(y.default(), Some(&serde_json::json!(2)));
    }

    #[test]
    fn tw_params_macro_builds_a_field_vector() {
        let params = crate::tw_params![flag: boolean, label: string, score: number];
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].value_type(), &ValueType::Boolean);
        assert_eq!(params[2].value_type(), &ValueType::Number);
    }

    #[test]
    fn tw_type_macro_covers_every_keyword() {
        assert_eq!(crate::tw_type!(boolean), ValueType::Boolean);
        assert_eq!(crate::tw_type!(integer), ValueType::Integer);
        assert_eq!(crate::tw_type!(number), ValueType::Number);
        assert_eq!(crate::tw_type!(string), ValueType::String);
        assert_eq!(crate::tw_type!(any), ValueType::Any);
    }
}
