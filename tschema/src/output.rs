//! Output shapes: verbatim record returns versus wrapped plain returns.

use serde_json::{Map, Value, json};

use crate::error::ValidationError;
use crate::record::RecordType;
use crate::value::ValueType;

/// How a return value is typed, decided once at descriptor construction.
///
/// A callable that already returns a record keeps that record untouched,
/// so all of its own field metadata round-trips. Anything else is wrapped
/// as a single `root` value with an optional description.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputShape {
    Verbatim(RecordType),
    Wrapped {
        value_type: ValueType,
        description: Option<String>,
    },
}

impl OutputShape {
    pub fn wrapped(value_type: ValueType) -> Self {
        Self::Wrapped {
            value_type,
            description: None,
        }
    }

    pub fn wrapped_with_description(value_type: ValueType, description: impl Into<String>) -> Self {
        Self::Wrapped {
            value_type,
            description: Some(description.into()),
        }
    }

    pub fn is_verbatim(&self) -> bool {
        matches!(self, Self::Verbatim(_))
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Verbatim(_) => None,
            Self::Wrapped { description, .. } => description.as_deref(),
        }
    }

    /// JSON-Schema-shaped mapping. Verbatim returns render the record's
    /// own schema; wrapped returns render the bare value-type schema
    /// titled `Output`, carrying the resolved return description.
    pub fn json_schema(&self) -> Value {
        match self {
            Self::Verbatim(record) => record.json_schema(),
            Self::Wrapped {
                value_type,
                description,
            } => {
                let mut schema = match value_type.json_schema() {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                schema.insert("title".to_string(), json!("Output"));
                if let Some(description) = description {
                    schema.insert("description".to_string(), json!(description));
                }
                Value::Object(schema)
            }
        }
    }

    /// Validates and coerces a raw return value against this shape.
    pub fn validate(&self, value: Value) -> Result<Value, ValidationError> {
        match self {
            Self::Verbatim(record) => match value {
                Value::Object(fields) => record.validate(&fields).map(Value::Object),
                other => Err(ValidationError::single(
                    "root",
                    format!("expected object matching '{}', got {other}", record.name()),
                )),
            },
            Self::Wrapped { value_type, .. } => {
                let mut issues = Vec::new();
                match value_type.check(&value, "root", &mut issues) {
                    Some(checked) => Ok(checked),
                    None => Err(ValidationError::new(issues)),
                }
            }
        }
    }
}
