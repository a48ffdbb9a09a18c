//! Named record types with ordered, constrained fields.

use serde_json::{Map, Value, json};

use crate::error::{SchemaError, ValidationError, ValidationIssue};
use crate::value::ValueType;

/// One field of a record type.
///
/// A field is required exactly when it has no default value. The order
/// index is assigned by the owning record at construction and serialized
/// as `x-order`, since JSON object serialization does not otherwise
/// preserve declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value_type: ValueType,
    description: Option<String>,
    default: Option<Value>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    exclusive_minimum: Option<f64>,
    exclusive_maximum: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    order: usize,
}

impl Field {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            description: None,
            default: None,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
            min_length: None,
            max_length: None,
            order: 0,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Supplies a default, which also makes the field optional.
    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn exclusive_minimum(mut self, bound: f64) -> Self {
        self.exclusive_minimum = Some(bound);
        self
    }

    pub fn exclusive_maximum(mut self, bound: f64) -> Self {
        self.exclusive_maximum = Some(bound);
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    fn property_schema(&self) -> Value {
        let mut schema = match self.value_type.json_schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if let Some(description) = &self.description {
            schema.insert("description".to_string(), json!(description));
        }
        if let Some(default) = &self.default {
            schema.insert("default".to_string(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            schema.insert("minimum".to_string(), json!(minimum));
        }
        if let Some(maximum) = self.maximum {
            schema.insert("maximum".to_string(), json!(maximum));
        }
        if let Some(bound) = self.exclusive_minimum {
            schema.insert("exclusiveMinimum".to_string(), json!(bound));
        }
        if let Some(bound) = self.exclusive_maximum {
            schema.insert("exclusiveMaximum".to_string(), json!(bound));
        }
        if let Some(length) = self.min_length {
            schema.insert("minLength".to_string(), json!(length));
        }
        if let Some(length) = self.max_length {
            schema.insert("maxLength".to_string(), json!(length));
        }
        schema.insert("x-order".to_string(), json!(self.order));

        Value::Object(schema)
    }

    fn check_value(
        &self,
        value: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        let checked = self.value_type.check(value, path, issues)?;
        let before = issues.len();

        if let Some(number) = checked.as_f64() {
            if let Some(minimum) = self.minimum
                && number < minimum
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{number} is less than the minimum of {minimum}"),
                ));
            }
            if let Some(maximum) = self.maximum
                && number > maximum
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{number} is greater than the maximum of {maximum}"),
                ));
            }
            if let Some(bound) = self.exclusive_minimum
                && number <= bound
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{number} must be greater than {bound}"),
                ));
            }
            if let Some(bound) = self.exclusive_maximum
                && number >= bound
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("{number} must be less than {bound}"),
                ));
            }
        }

        if let Some(text) = checked.as_str() {
            let length = text.chars().count();
            if let Some(min_length) = self.min_length
                && length < min_length
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("length {length} is shorter than the minimum of {min_length}"),
                ));
            }
            if let Some(max_length) = self.max_length
                && length > max_length
            {
                issues.push(ValidationIssue::new(
                    path,
                    format!("length {length} is longer than the maximum of {max_length}"),
                ));
            }
        }

        (issues.len() == before).then_some(checked)
    }
}

/// A structured type with named, typed, ordered fields.
///
/// Field names are unique and defaults are checked against their declared
/// types at construction; both violations surface as [`SchemaError`]s
/// rather than call-time failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    name: String,
    fields: Vec<Field>,
    allow_extra: bool,
}

impl RecordType {
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn allows_extra(&self) -> bool {
        self.allow_extra
    }

    /// JSON-Schema-shaped mapping for this record. Deterministic: fields
    /// appear in declaration order and carry their `x-order` markers.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(field.name.clone(), field.property_schema());
            if field.is_required() {
                required.push(json!(field.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("title".to_string(), json!(self.name));
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(schema)
    }

    /// Validates and coerces an argument bag against this record.
    ///
    /// Unknown fields are rejected unless the record allows extras;
    /// absent optional fields are filled from their defaults. All issues
    /// are collected before failing.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<Map<String, Value>, ValidationError> {
        let mut issues = Vec::new();
        match self.validate_at(args, "", &mut issues) {
            Some(validated) => Ok(validated),
            None => Err(ValidationError::new(issues)),
        }
    }

    pub(crate) fn validate_at(
        &self,
        args: &Map<String, Value>,
        prefix: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Map<String, Value>> {
        let before = issues.len();
        let mut validated = Map::new();

        if !self.allow_extra {
            for key in args.keys() {
                if self.field(key).is_none() {
                    issues.push(ValidationIssue::new(
                        join_path(prefix, key),
                        "unexpected field",
                    ));
                }
            }
        }

        for field in &self.fields {
            let path = join_path(prefix, &field.name);
            match args.get(&field.name) {
                Some(value) => {
                    if let Some(checked) = field.check_value(value, &path, issues) {
                        validated.insert(field.name.clone(), checked);
                    }
                }
                None if field.is_required() => {
                    issues.push(ValidationIssue::new(path, "missing required field"));
                }
                None => {
                    if let Some(default) = &field.default {
                        validated.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }

        if self.allow_extra {
            for (key, value) in args {
                if self.field(key).is_none() {
                    validated.insert(key.clone(), value.clone());
                }
            }
        }

        (issues.len() == before).then_some(validated)
    }
}

#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: String,
    fields: Vec<Field>,
    allow_extra: bool,
}

impl RecordTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            allow_extra: false,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn allow_extra(mut self) -> Self {
        self.allow_extra = true;
        self
    }

    pub fn build(self) -> Result<RecordType, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::empty_name("record name must not be empty"));
        }

        let mut fields = self.fields;
        for (order, field) in fields.iter_mut().enumerate() {
            field.order = order;
        }

        for (index, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(
                    SchemaError::empty_name("field name must not be empty")
                        .with_subject(self.name.clone()),
                );
            }
            if fields[..index].iter().any(|seen| seen.name == field.name) {
                return Err(
                    SchemaError::duplicate_field(&field.name).with_subject(self.name.clone())
                );
            }
            if let Some(default) = &field.default {
                let mut issues = Vec::new();
                if field.check_value(default, &field.name, &mut issues).is_none() {
                    let reasons = issues
                        .iter()
                        .map(|issue| issue.reason.clone())
                        .collect::<Vec<_>>()
                        .join("; ");
                    return Err(
                        SchemaError::invalid_default(&field.name, reasons)
                            .with_subject(self.name.clone()),
                    );
                }
            }
        }

        Ok(RecordType {
            name: self.name,
            fields,
            allow_extra: self.allow_extra,
        })
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
