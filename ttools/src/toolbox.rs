//! Ordered, name-unique collection of tools exposed to an assistant.

use std::sync::Arc;

use tcommon::OrderedRegistry;
use tfunction::Function;
use tschema::{Field, RecordType, ValueType};

use crate::error::ToolboxError;
use crate::slot::ResultSlot;

/// Wire name the capture tool is serialized under, for protocol
/// compatibility. User tools may not claim it.
pub const CAPTURE_TOOL_NAME: &str = "__return__";

pub const CAPTURE_TOOL_DESCRIPTION: &str = "Returns structured output back to the user. \
    Use this to end your response, but don't mention the existence of this tool.";

const CAPTURE_VALUE_DESCRIPTION: &str = "The value to return to the user.";

/// The synthetic tool whose invocation resolves the shared result slot
/// instead of returning a value through the normal channel.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureTool {
    input: RecordType,
    value_type: ValueType,
}

impl CaptureTool {
    fn new(value_type: ValueType) -> Result<Self, ToolboxError> {
        let input = RecordType::builder("Capture_Input")
            .field(Field::new("value", value_type.clone()).description(CAPTURE_VALUE_DESCRIPTION))
            .build()
            .map_err(|error| ToolboxError::invalid_result_type(error.to_string()))?;

        Ok(Self { input, value_type })
    }

    pub fn input(&self) -> &RecordType {
        &self.input
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }
}

/// One toolbox entry: a user-provided descriptor or the capture tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEntry {
    User(Function),
    Capture(CaptureTool),
}

impl ToolEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::User(function) => function.name(),
            Self::Capture(_) => CAPTURE_TOOL_NAME,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::User(function) => function.description(),
            Self::Capture(_) => Some(CAPTURE_TOOL_DESCRIPTION),
        }
    }

    pub fn input_schema(&self) -> serde_json::Value {
        match self {
            Self::User(function) => function.schema(),
            Self::Capture(capture) => capture.input().json_schema(),
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture(_))
    }
}

/// Name-keyed, insertion-ordered collection of function descriptors,
/// optionally augmented with a capture tool and its shared result slot.
///
/// Built once, read-only afterwards except for the slot's one-time
/// settlement.
#[derive(Debug)]
pub struct Toolbox {
    entries: OrderedRegistry<String, ToolEntry>,
    slot: Option<Arc<ResultSlot>>,
    result_type: Option<ValueType>,
}

impl Toolbox {
    pub fn new(functions: impl IntoIterator<Item = Function>) -> Result<Self, ToolboxError> {
        Self::build(functions, None)
    }

    /// Builds a capturing toolbox: one extra reserved tool is appended
    /// whose dispatch resolves the shared slot with a value of
    /// `result_type`.
    pub fn with_result_type(
        functions: impl IntoIterator<Item = Function>,
        result_type: ValueType,
    ) -> Result<Self, ToolboxError> {
        Self::build(functions, Some(result_type))
    }

    fn build(
        functions: impl IntoIterator<Item = Function>,
        result_type: Option<ValueType>,
    ) -> Result<Self, ToolboxError> {
        let mut entries = OrderedRegistry::new();

        for function in functions {
            if function.name() == CAPTURE_TOOL_NAME {
                return Err(ToolboxError::reserved_name(function.name()));
            }
            if entries.contains_key(function.name()) {
                return Err(ToolboxError::duplicate_name(function.name()));
            }
            if function.description().is_none() {
                tracing::warn!(tool = function.name(), "tool has no description");
            }
            entries.insert(function.name().to_string(), ToolEntry::User(function));
        }

        let mut slot = None;
        if let Some(result_type) = &result_type {
            let capture = CaptureTool::new(result_type.clone())?;
            entries.insert(CAPTURE_TOOL_NAME.to_string(), ToolEntry::Capture(capture));
            slot = Some(Arc::new(ResultSlot::new()));
        }

        Ok(Self {
            entries,
            slot,
            result_type,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.get(name)
    }

    /// Entries in insertion order, capture tool last when present.
    pub fn entries(&self) -> impl Iterator<Item = &ToolEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The shared one-shot slot, present exactly when a result type was
    /// supplied at construction.
    pub fn slot(&self) -> Option<Arc<ResultSlot>> {
        self.slot.as_ref().map(Arc::clone)
    }

    pub fn result_type(&self) -> Option<&ValueType> {
        self.result_type.as_ref()
    }
}

impl PartialEq for Toolbox {
    /// Structural comparison over the name-to-entry mapping; the slot's
    /// state never participates.
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::error::ToolboxErrorKind;

    fn named(name: &str) -> Function {
        Function::builder(name)
            .description("A test tool")
            .sync_handler(|_| Ok(Value::Null))
            .build()
            .expect("descriptor should build")
    }

    #[test]
    fn entries_keep_insertion_order() {
        let toolbox =
            Toolbox::new([named("zeta"), named("alpha"), named("mid")]).expect("toolbox builds");

        let names: Vec<&str> = toolbox.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(toolbox.slot().is_none());
    }

    #[test]
    fn duplicate_names_fail_construction() {
        let error = Toolbox::new([named("add"), named("add")]).expect_err("duplicate should fail");
        assert_eq!(error.kind, ToolboxErrorKind::DuplicateName);
    }

    #[test]
    fn reserved_name_fails_construction() {
        let error =
            Toolbox::new([named(CAPTURE_TOOL_NAME)]).expect_err("reserved name should fail");
        assert_eq!(error.kind, ToolboxErrorKind::ReservedName);
    }

    #[test]
    fn result_type_appends_exactly_one_capture_tool() {
        let toolbox = Toolbox::with_result_type([named("add")], ValueType::Boolean)
            .expect("toolbox builds");

        assert_eq!(toolbox.len(), 2);
        assert!(toolbox.slot().is_some());

        let capture = toolbox
            .lookup(CAPTURE_TOOL_NAME)
            .expect("capture tool should be registered");
        assert!(capture.is_capture());

        let schema = capture.input_schema();
        assert_eq!(schema["required"], json!(["value"]));
        assert_eq!(schema["properties"]["value"]["type"], json!("boolean"));
    }

    #[test]
    fn equality_compares_the_name_to_entry_mapping() {
        let left = Toolbox::with_result_type([named("add")], ValueType::Boolean)
            .expect("toolbox builds");
        let right = Toolbox::with_result_type([named("add")], ValueType::Boolean)
            .expect("toolbox builds");
        let different = Toolbox::new([named("add")]).expect("toolbox builds");

        assert_eq!(left, right);
        assert_ne!(left, different);
    }
}
