//! The function descriptor: a callable plus its derived schemas.
//!
//! ```rust
//! use serde_json::json;
//! use tfunction::Function;
//! use tschema::{Field, ValueType};
//!
//! let add = Function::builder("add")
//!     .doc(
//!         "Returns the sum of two numbers.
//!
//!         :param x: The first number
//!         :param y: The second number
//!         :return: The sum of the two numbers",
//!     )
//!     .param(Field::new("x", ValueType::Integer))
//!     .param(Field::new("y", ValueType::Integer).default_value(json!(2)))
//!     .returns(ValueType::Integer)
//!     .sync_handler(|args| {
//!         let x = args["x"].as_i64().unwrap_or_default();
//!         let y = args["y"].as_i64().unwrap_or_default();
//!         Ok(json!(x + y))
//!     })
//!     .build()
//!     .expect("descriptor should build");
//!
//! let schema = add.schema();
//! assert_eq!(schema["required"], json!(["x"]));
//! assert_eq!(schema["properties"]["x"]["description"], json!("The first number"));
//! ```

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use tcommon::BoxFuture;
use tschema::{Field, OutputShape, RecordType, SchemaError, ValueType, parse_doc};

use crate::error::{HandlerError, InvokeError};

/// Argument bag passed into and out of handlers.
pub type ArgMap = Map<String, Value>;

/// What a wrapped callable returns: a raw value or its own failure.
pub type HandlerResult = Result<Value, HandlerError>;

type Handler = dyn Fn(ArgMap) -> BoxFuture<'static, HandlerResult> + Send + Sync;

/// A callable wrapped together with its name, description, and derived
/// input/output types.
///
/// Both types are derived exactly once, at build time, and are immutable
/// thereafter. Cloning shares the underlying handler.
#[derive(Clone)]
pub struct Function {
    name: String,
    description: Option<String>,
    input: RecordType,
    output: OutputShape,
    handler: Arc<Handler>,
}

impl Function {
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn input(&self) -> &RecordType {
        &self.input
    }

    pub fn output(&self) -> &OutputShape {
        &self.output
    }

    /// JSON-Schema-shaped mapping of the input type. Pure and
    /// deterministic for a given descriptor.
    pub fn schema(&self) -> Value {
        self.input.json_schema()
    }

    pub fn output_schema(&self) -> Value {
        self.output.json_schema()
    }

    /// Combined document schema, titled by the function name, with the
    /// input and output schemas under `$defs`. Consumed by surfaces that
    /// document a function as a whole.
    pub fn json_schema(&self) -> Value {
        json!({
            "title": self.name,
            "$defs": {
                "Input": self.schema(),
                "Output": self.output_schema(),
            }
        })
    }

    /// Validates `args` against the input type, runs the wrapped
    /// callable, and validates/coerces its result against the output
    /// shape.
    ///
    /// Handler failures propagate verbatim as
    /// [`InvokeError::Handler`]; they are never reclassified as
    /// validation errors.
    pub fn invoke<'a>(&'a self, args: ArgMap) -> BoxFuture<'a, Result<Value, InvokeError>> {
        Box::pin(async move {
            let validated = self
                .input
                .validate(&args)
                .map_err(InvokeError::InvalidInput)?;
            let raw = (self.handler)(validated)
                .await
                .map_err(InvokeError::Handler)?;
            self.output.validate(raw).map_err(InvokeError::InvalidOutput)
        })
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.input == other.input
            && self.output == other.output
    }
}

enum OutputDecl {
    Wrapped(ValueType),
    Record(RecordType),
}

/// Explicit descriptor builder: the developer declares what reflection
/// would otherwise have to discover.
pub struct FunctionBuilder {
    name: String,
    description: Option<String>,
    doc: Option<String>,
    params: Vec<Field>,
    output: Option<OutputDecl>,
    return_description: Option<String>,
    handler: Option<Arc<Handler>>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            doc: None,
            params: Vec::new(),
            output: None,
            return_description: None,
            handler: None,
        }
    }

    /// Explicit description; wins over anything parsed from [`doc`](Self::doc).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raw doc comment, parsed once at build time for the description,
    /// per-parameter descriptions, and the return description.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declares the next parameter. Declaration order is preserved; the
    /// field is required exactly when it carries no default.
    pub fn param(mut self, field: Field) -> Self {
        self.params.push(field);
        self
    }

    pub fn params(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.params.extend(fields);
        self
    }

    /// Declares a plain return type, wrapped as a single `root` value.
    pub fn returns(mut self, value_type: ValueType) -> Self {
        self.output = Some(OutputDecl::Wrapped(value_type));
        self
    }

    /// Declares a record return type, used verbatim as the output type.
    pub fn returns_record(mut self, record: RecordType) -> Self {
        self.output = Some(OutputDecl::Record(record));
        self
    }

    /// Explicit return description; wins over the doc comment's.
    pub fn return_description(mut self, description: impl Into<String>) -> Self {
        self.return_description = Some(description.into());
        self
    }

    pub fn handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(ArgMap) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |args| Box::pin(handler(args))));
        self
    }

    pub fn sync_handler<F>(self, handler: F) -> Self
    where
        F: Fn(ArgMap) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler(move |args| {
            let output = handler(args);
            async move { output }
        })
    }

    /// Derives the input and output types and freezes the descriptor.
    ///
    /// All derivation failures surface here, attributed to the function
    /// by name, never at call time.
    pub fn build(self) -> Result<Function, SchemaError> {
        let name = self.name;
        if name.trim().is_empty() {
            return Err(SchemaError::empty_name("function name must not be empty"));
        }

        let handler = self.handler.ok_or_else(|| {
            SchemaError::missing_handler("function has no handler").with_subject(name.clone())
        })?;

        let parsed = self.doc.as_deref().map(parse_doc).unwrap_or_default();
        let description = self.description.or_else(|| parsed.description());

        let mut fields = self.params;
        for field in &mut fields {
            // Explicit field metadata wins; the doc comment only backfills.
            if !field.has_description()
                && let Some(text) = parsed.param(field.name())
            {
                *field = field.clone().description(text);
            }
        }

        let input = RecordType::builder(format!("{name}_Input"))
            .fields(fields)
            .build()
            .map_err(|error| error.with_subject(name.clone()))?;

        let return_description = self.return_description.or_else(|| parsed.returns.clone());
        let output = match self.output {
            Some(OutputDecl::Record(record)) => OutputShape::Verbatim(record),
            Some(OutputDecl::Wrapped(value_type)) => OutputShape::Wrapped {
                value_type,
                description: return_description,
            },
            None => OutputShape::Wrapped {
                value_type: ValueType::Any,
                description: return_description,
            },
        };

        Ok(Function {
            name,
            description,
            input,
            output,
            handler,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tschema::SchemaErrorKind;

    use super::*;

    const ADD_DOC: &str = "
        Returns the sum of two numbers.

        :param x: The first number
        :param y: The second number (from docstring)
        :return: The sum of the two numbers";

    fn add() -> Function {
        Function::builder("add")
            .doc(ADD_DOC)
            .param(Field::new("x", ValueType::Integer))
            .param(
                Field::new("y", ValueType::Integer)
                    .description("The second number (from field)")
                    .default_value(json!(2)),
            )
            .returns(ValueType::Integer)
            .sync_handler(|args| {
                let x = args["x"].as_i64().unwrap_or_default();
                let y = args["y"].as_i64().unwrap_or_default();
                Ok(json!(x + y))
            })
            .build()
            .expect("descriptor should build")
    }

    #[test]
    fn schema_reflects_fields_requiredness_and_order() {
        let function = add();
        let schema = function.schema();

        assert_eq!(schema["title"], json!("add_Input"));
        assert_eq!(schema["required"], json!(["x"]));
        assert_eq!(schema["properties"]["x"]["x-order"], json!(0));
        assert_eq!(schema["properties"]["y"]["x-order"], json!(1));
        assert_eq!(schema["properties"]["y"]["default"], json!(2));
    }

    #[test]
    fn explicit_field_description_wins_over_docstring() {
        let function = add();
        let schema = function.schema();

        assert_eq!(
            schema["properties"]["x"]["description"],
            json!("The first number")
        );
        assert_eq!(
            schema["properties"]["y"]["description"],
            json!("The second number (from field)")
        );
    }

    #[test]
    fn description_and_return_description_come_from_the_doc() {
        let function = add();
        assert_eq!(
            function.description(),
            Some("Returns the sum of two numbers.")
        );
        assert_eq!(
            function.output_schema()["description"],
            json!("The sum of the two numbers")
        );
    }

    #[test]
    fn combined_schema_nests_input_and_output_under_defs() {
        let function = add();
        let schema = function.json_schema();

        assert_eq!(schema["title"], json!("add"));
        assert_eq!(schema["$defs"]["Input"], function.schema());
        assert_eq!(schema["$defs"]["Output"]["type"], json!("integer"));
    }

    #[test]
    fn explicit_return_description_wins_over_docstring() {
        let function = Function::builder("add")
            .doc(ADD_DOC)
            .param(Field::new("x", ValueType::Integer))
            .returns(ValueType::Integer)
            .return_description("Explicit return text")
            .sync_handler(|_| Ok(json!(0)))
            .build()
            .expect("descriptor should build");

        assert_eq!(
            function.output_schema()["description"],
            json!("Explicit return text")
        );
    }

    #[test]
    fn missing_return_annotation_wraps_any() {
        let function = Function::builder("fire_and_forget")
            .sync_handler(|_| Ok(Value::Null))
            .build()
            .expect("descriptor should build");

        assert!(!function.output().is_verbatim());
        assert_eq!(function.output_schema()["title"], json!("Output"));
    }

    #[test]
    fn record_return_is_used_verbatim() {
        let record = RecordType::builder("Forecast")
            .field(Field::new("summary", ValueType::String).description("One line"))
            .build()
            .expect("record should build");
        let function = Function::builder("forecast")
            .returns_record(record.clone())
            .sync_handler(|_| Ok(json!({"summary": "clear"})))
            .build()
            .expect("descriptor should build");

        assert!(function.output().is_verbatim());
        assert_eq!(function.output_schema(), record.json_schema());
    }

    #[test]
    fn build_fails_without_a_handler() {
        let error = Function::builder("nameless")
            .param(Field::new("x", ValueType::Integer))
            .build()
            .expect_err("missing handler should fail");

        assert_eq!(error.kind, SchemaErrorKind::MissingHandler);
        assert_eq!(error.subject.as_deref(), Some("nameless"));
    }

    #[test]
    fn build_attributes_duplicate_params_to_the_function() {
        let error = Function::builder("add")
            .param(Field::new("x", ValueType::Integer))
            .param(Field::new("x", ValueType::Integer))
            .sync_handler(|_| Ok(Value::Null))
            .build()
            .expect_err("duplicate param should fail");

        assert_eq!(error.kind, SchemaErrorKind::DuplicateField);
        assert_eq!(error.subject.as_deref(), Some("add"));
    }

    #[test]
    fn clones_share_the_handler_and_compare_equal() {
        let function = add();
        let clone = function.clone();
        assert_eq!(function, clone);
    }
}
