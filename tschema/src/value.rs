//! Value types and coercing checks for single values.

use serde_json::{Map, Value, json};

use crate::error::ValidationIssue;
use crate::record::RecordType;

/// The shape of a single value: the target-language equivalent of a type
/// annotation on one parameter or return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Boolean,
    Integer,
    Number,
    String,
    Array(Box<ValueType>),
    Record(RecordType),
    Literal(Vec<Value>),
    Any,
}

impl ValueType {
    pub fn array(item: ValueType) -> Self {
        Self::Array(Box::new(item))
    }

    pub fn literal(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Literal(values.into_iter().collect())
    }

    /// Human-readable name used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "object",
            Self::Literal(_) => "literal",
            Self::Any => "any",
        }
    }

    /// Bare JSON Schema fragment for this type, before field-level
    /// decoration (description, default, constraints, order marker).
    pub fn json_schema(&self) -> Value {
        match self {
            Self::Boolean => json!({"type": "boolean"}),
            Self::Integer => json!({"type": "integer"}),
            Self::Number => json!({"type": "number"}),
            Self::String => json!({"type": "string"}),
            Self::Array(item) => json!({"type": "array", "items": item.json_schema()}),
            Self::Record(record) => record.json_schema(),
            Self::Literal(values) => json!({"enum": values}),
            Self::Any => Value::Object(Map::new()),
        }
    }

    /// Type-checks `value` at `path`, recording issues and returning the
    /// coerced value on success.
    ///
    /// Coercions are narrow: integer-valued floats collapse to integers,
    /// and integers pass as numbers. Everything else is strict.
    pub(crate) fn check(
        &self,
        value: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Option<Value> {
        match self {
            Self::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::Integer => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
                Value::Number(n) => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => {
                        Some(json!(f as i64))
                    }
                    _ => {
                        issues.push(mismatch(path, self, value));
                        None
                    }
                },
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::Number => match value {
                Value::Number(_) => Some(value.clone()),
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::String => match value {
                Value::String(_) => Some(value.clone()),
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::Array(item) => match value {
                Value::Array(elements) => {
                    let before = issues.len();
                    let checked: Vec<Value> = elements
                        .iter()
                        .enumerate()
                        .filter_map(|(index, element)| {
                            item.check(element, &format!("{path}[{index}]"), issues)
                        })
                        .collect();
                    (issues.len() == before).then_some(Value::Array(checked))
                }
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::Record(record) => match value {
                Value::Object(fields) => record
                    .validate_at(fields, path, issues)
                    .map(Value::Object),
                _ => {
                    issues.push(mismatch(path, self, value));
                    None
                }
            },
            Self::Literal(allowed) => {
                if allowed.contains(value) {
                    Some(value.clone())
                } else {
                    issues.push(ValidationIssue::new(
                        path,
                        format!("value {value} is not one of the allowed literals"),
                    ));
                    None
                }
            }
            Self::Any => Some(value.clone()),
        }
    }
}

fn mismatch(path: &str, expected: &ValueType, actual: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path,
        format!("expected {}, got {}", expected.label(), type_of(actual)),
    )
}

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_ok(ty: &ValueType, value: Value) -> Value {
        let mut issues = Vec::new();
        let checked = ty.check(&value, "v", &mut issues);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        checked.expect("value should pass")
    }

    fn check_err(ty: &ValueType, value: Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let checked = ty.check(&value, "v", &mut issues);
        assert!(checked.is_none());
        assert!(!issues.is_empty());
        issues
    }

    #[test]
    fn integer_accepts_integral_floats_and_rejects_fractions() {
        assert_eq!(check_ok(&ValueType::Integer, json!(3)), json!(3));
        assert_eq!(check_ok(&ValueType::Integer, json!(3.0)), json!(3));

        let issues = check_err(&ValueType::Integer, json!(3.5));
        assert!(issues[0].reason.contains("expected integer"));
    }

    #[test]
    fn string_and_boolean_are_strict() {
        assert_eq!(check_ok(&ValueType::String, json!("hi")), json!("hi"));
        check_err(&ValueType::String, json!(7));
        check_err(&ValueType::Boolean, json!("true"));
    }

    #[test]
    fn array_checks_each_element_with_indexed_paths() {
        let ty = ValueType::array(ValueType::Integer);
        assert_eq!(check_ok(&ty, json!([1, 2.0, 3])), json!([1, 2, 3]));

        let issues = check_err(&ty, json!([1, "two", 3.5]));
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert_eq!(paths, ["v[1]", "v[2]"]);
    }

    #[test]
    fn literal_requires_membership() {
        let ty = ValueType::literal([json!(1), json!(2), json!(3)]);
        assert_eq!(check_ok(&ty, json!(2)), json!(2));
        check_err(&ty, json!(4));
    }

    #[test]
    fn any_passes_everything_through() {
        assert_eq!(check_ok(&ValueType::Any, json!(null)), json!(null));
        assert_eq!(
            check_ok(&ValueType::Any, json!({"nested": [1]})),
            json!({"nested": [1]})
        );
    }

    #[test]
    fn schema_fragments_match_json_schema_shapes() {
        assert_eq!(ValueType::Integer.json_schema(), json!({"type": "integer"}));
        assert_eq!(
            ValueType::array(ValueType::String).json_schema(),
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert_eq!(
            ValueType::literal([json!("a"), json!("b")]).json_schema(),
            json!({"enum": ["a", "b"]})
        );
        assert_eq!(ValueType::Any.json_schema(), json!({}));
    }
}
